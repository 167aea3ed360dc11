use phonebook_core::{ContactId, CoreError};
use phonebook_store::error::StoreError;
use thiserror::Error;

/// Every failure a front end can get back from the contact book. None of
/// them is fatal; the caller shows the message and lets the user retry.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Please enter a valid name (at least 2 characters).")]
    InvalidName,
    #[error("Please enter a valid Indian phone number.")]
    InvalidPhone,
    #[error("Phone number already exists.")]
    DuplicatePhone(String),
    #[error("contact id {0} is already in use")]
    DuplicateId(ContactId),
    #[error("contact storage is unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),
    #[error("stored contacts are corrupt: {0}")]
    StorageCorrupt(#[source] StoreError),
}

pub type Result<T> = std::result::Result<T, ContactError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactErrorKind {
    InvalidName,
    InvalidPhone,
    DuplicatePhone,
    DuplicateId,
    StorageUnavailable,
    StorageCorrupt,
}

impl ContactError {
    pub fn kind(&self) -> ContactErrorKind {
        match self {
            ContactError::InvalidName => ContactErrorKind::InvalidName,
            ContactError::InvalidPhone => ContactErrorKind::InvalidPhone,
            ContactError::DuplicatePhone(_) => ContactErrorKind::DuplicatePhone,
            ContactError::DuplicateId(_) => ContactErrorKind::DuplicateId,
            ContactError::StorageUnavailable(_) => ContactErrorKind::StorageUnavailable,
            ContactError::StorageCorrupt(_) => ContactErrorKind::StorageCorrupt,
        }
    }
}

impl From<CoreError> for ContactError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidName => ContactError::InvalidName,
            CoreError::NonCanonicalPhone(_) => ContactError::InvalidPhone,
            CoreError::DuplicatePhone(phone) => ContactError::DuplicatePhone(phone),
            CoreError::DuplicateId(id) => ContactError::DuplicateId(id),
        }
    }
}

impl From<StoreError> for ContactError {
    fn from(err: StoreError) -> Self {
        if err.is_corrupt() {
            ContactError::StorageCorrupt(err)
        } else {
            ContactError::StorageUnavailable(err)
        }
    }
}
