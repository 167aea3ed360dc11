use crate::error::{Result, StoreError};
use crate::repo::slots::SlotsRepo;
use crate::ContactStore;
use phonebook_core::time::now_utc;
use phonebook_core::ContactCollection;
use rusqlite::Connection;
use tracing::debug;

/// The contact list, stored as one JSON array under a single slot key.
pub struct ContactsSlot<'a> {
    conn: &'a Connection,
    key: String,
}

impl<'a> ContactsSlot<'a> {
    pub(crate) fn new(conn: &'a Connection, key: &str) -> Self {
        Self {
            conn,
            key: key.to_string(),
        }
    }

    fn slots(&self) -> SlotsRepo<'a> {
        SlotsRepo::new(self.conn)
    }
}

impl ContactStore for ContactsSlot<'_> {
    fn load(&self) -> Result<ContactCollection> {
        let raw = match self.slots().get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(ContactCollection::new()),
        };

        let contacts: ContactCollection =
            serde_json::from_str(&raw).map_err(|source| StoreError::CorruptSnapshot {
                key: self.key.clone(),
                source,
            })?;
        contacts
            .validate()
            .map_err(|source| StoreError::InvalidSnapshot {
                key: self.key.clone(),
                source,
            })?;
        Ok(contacts)
    }

    fn save(&self, contacts: &ContactCollection) -> Result<()> {
        let raw = serde_json::to_string(contacts).map_err(StoreError::Serialize)?;
        self.slots().set(now_utc(), &self.key, &raw)?;
        debug!(key = %self.key, contacts = contacts.len(), "contacts saved");
        Ok(())
    }
}
