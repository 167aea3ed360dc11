use anyhow::Error;
use phonebook_config::ConfigError;
use phonebook_service::{ContactError, ContactErrorKind};
use phonebook_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if cause.downcast_ref::<CliError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(contact_err) = cause.downcast_ref::<ContactError>() {
            return ExitCode::from(contact_exit_code(contact_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn contact_exit_code(err: &ContactError) -> u8 {
    match err.kind() {
        ContactErrorKind::InvalidName
        | ContactErrorKind::InvalidPhone
        | ContactErrorKind::DuplicatePhone
        | ContactErrorKind::StorageCorrupt => EXIT_INVALID_INPUT,
        ContactErrorKind::DuplicateId | ContactErrorKind::StorageUnavailable => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::InvalidDataPath
        | StoreErrorKind::InvalidBackupPath
        | StoreErrorKind::InvalidSlotKey
        | StoreErrorKind::CorruptSnapshot
        | StoreErrorKind::InvalidSnapshot => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Serialize
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidStorageKey(_)
        | ConfigError::InvalidLatency { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
