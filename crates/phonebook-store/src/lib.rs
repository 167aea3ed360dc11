pub mod backup;
pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use phonebook_core::ContactCollection;
use rusqlite::Connection;
use std::path::Path;

pub const DEFAULT_CONTACTS_KEY: &str = "contacts";

/// Snapshot persistence for the contact list.
///
/// `load` returns the whole collection (empty when nothing was saved yet) and
/// `save` replaces it in a single all-or-nothing write.
pub trait ContactStore {
    fn load(&self) -> Result<ContactCollection>;
    fn save(&self, contacts: &ContactCollection) -> Result<()>;
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn backup_to(&self, path: &Path) -> Result<()> {
        backup::backup_to(&self.conn, path)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn slots(&self) -> repo::SlotsRepo<'_> {
        repo::SlotsRepo::new(&self.conn)
    }

    pub fn contacts(&self) -> repo::ContactsSlot<'_> {
        repo::ContactsSlot::new(&self.conn, DEFAULT_CONTACTS_KEY)
    }

    pub fn contacts_at(&self, key: &str) -> Result<repo::ContactsSlot<'_>> {
        repo::validate_slot_key(key)?;
        Ok(repo::ContactsSlot::new(&self.conn, key))
    }
}
