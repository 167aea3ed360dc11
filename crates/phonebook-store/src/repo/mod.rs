pub mod contacts;
pub mod slots;

pub use contacts::ContactsSlot;
pub use slots::{validate_slot_key, SlotsRepo};
