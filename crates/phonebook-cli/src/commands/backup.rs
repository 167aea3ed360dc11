use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use phonebook_service::{ContactBook, ContactErrorKind};
use phonebook_store::error::StoreError;
use phonebook_store::paths;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Destination file (defaults to the backups folder in the data directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: String,
    size_bytes: u64,
    contacts: Option<usize>,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let contacts = contact_count(ctx.book)?;
    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path()?,
    };

    ctx.store.backup_to(&out).map_err(|err| {
        let message = match &err {
            StoreError::InvalidBackupPath(_) => {
                format!("backup path matches database: {}", out.display())
            }
            _ => format!("backup database to {}", out.display()),
        };
        anyhow::Error::new(err).context(message)
    })?;

    let size = fs::metadata(&out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    if ctx.json {
        return print_json(&BackupReport {
            output: out.display().to_string(),
            size_bytes: size,
            contacts,
        });
    }

    println!("Backup written to {}", out.display());
    Ok(())
}

/// Number of stored contacts, or `None` when the slot is corrupt. A corrupt
/// slot is still backed up; any other load failure aborts.
fn contact_count<B: ContactBook>(book: &B) -> Result<Option<usize>> {
    match book.on_load() {
        Ok(contacts) => Ok(Some(contacts.len())),
        Err(err) if err.kind() == ContactErrorKind::StorageCorrupt => Ok(None),
        Err(err) => Err(err).with_context(|| "load contacts for backup"),
    }
}
