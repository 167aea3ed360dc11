pub mod error;
pub mod service;

pub use error::{ContactError, ContactErrorKind};
pub use service::{ContactBook, ContactService, ServiceOptions};
