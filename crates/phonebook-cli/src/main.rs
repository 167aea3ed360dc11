mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{backup, completions, contacts, Context};
use crate::error::{exit_code_for, report_error};
use phonebook_config as config;
use phonebook_service::{ContactService, ServiceOptions};
use phonebook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "phonebook", version, about = "Contact book for Indian phone numbers")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a contact
    Add(contacts::AddArgs),
    /// List contacts in the order they were added
    List(contacts::ListArgs),
    /// Delete a contact by id
    Delete(contacts::DeleteArgs),
    /// Copy the contact database to a backup file
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let slot = store
        .contacts_at(&app_config.storage_key)
        .with_context(|| "open contacts slot")?;
    let book = ContactService::new(
        slot,
        ServiceOptions {
            add_latency: app_config.latency.add(),
            delete_latency: app_config.latency.delete(),
        },
    );

    let ctx = Context {
        store: &store,
        book: &book,
        json,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .with_context(|| "start runtime")?;

    runtime.block_on(async {
        match command {
            Command::Add(args) => contacts::add_contact(&ctx, args).await,
            Command::List(args) => contacts::list_contacts(&ctx, args),
            Command::Delete(args) => contacts::delete_contact(&ctx, args).await,
            Command::Backup(args) => backup::backup(&ctx, args),
            Command::Completions(_) => {
                unreachable!("completions command handled before store initialization")
            }
        }
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
