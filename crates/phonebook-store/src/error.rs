use phonebook_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("migration error: {0}")]
    Migration(String),
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("invalid backup path (matches database): {0}")]
    InvalidBackupPath(PathBuf),
    #[error("invalid slot key: {0:?}")]
    InvalidSlotKey(String),
    #[error("failed to serialize contacts: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("slot {key:?} does not hold a contact list: {source}")]
    CorruptSnapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("slot {key:?} holds invalid contacts: {source}")]
    InvalidSnapshot {
        key: String,
        #[source]
        source: CoreError,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    MissingHomeDir,
    Migration,
    InvalidDataPath,
    InvalidBackupPath,
    InvalidSlotKey,
    Serialize,
    CorruptSnapshot,
    InvalidSnapshot,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::InvalidBackupPath(_) => StoreErrorKind::InvalidBackupPath,
            StoreError::InvalidSlotKey(_) => StoreErrorKind::InvalidSlotKey,
            StoreError::Serialize(_) => StoreErrorKind::Serialize,
            StoreError::CorruptSnapshot { .. } => StoreErrorKind::CorruptSnapshot,
            StoreError::InvalidSnapshot { .. } => StoreErrorKind::InvalidSnapshot,
        }
    }

    /// The slot exists but its contents cannot be used as a contact list.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self.kind(),
            StoreErrorKind::CorruptSnapshot | StoreErrorKind::InvalidSnapshot
        )
    }
}
