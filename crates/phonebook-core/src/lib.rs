pub mod domain;
pub mod error;
pub mod time;

pub use domain::*;
pub use error::CoreError;
