pub mod contact;
pub mod ids;
pub mod name;
pub mod phone;

pub use contact::{Contact, ContactCollection};
pub use ids::ContactId;
pub use name::{is_valid_name, normalize_name, MIN_NAME_CHARS};
pub use phone::{is_canonical_phone, is_valid_phone, normalize_phone, CANONICAL_PREFIX};
