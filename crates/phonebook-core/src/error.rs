use crate::domain::ContactId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("name must have at least 2 characters")]
    InvalidName,
    #[error("phone is not in canonical form: {0}")]
    NonCanonicalPhone(String),
    #[error("duplicate phone: {0}")]
    DuplicatePhone(String),
    #[error("duplicate contact id: {0}")]
    DuplicateId(ContactId),
}
