use crate::error::{Result, StoreError};
use rusqlite::{params, Connection, OptionalExtension};

/// String values stored under named keys, the local analogue of a browser's
/// key-value storage.
pub struct SlotsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SlotsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_slot_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Replaces the value under `key`. The write is one transaction, so a
    /// failure leaves the previous value in place.
    pub fn set(&self, now_utc: i64, key: &str, value: &str) -> Result<()> {
        validate_slot_key(key)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at;",
            params![key, value, now_utc],
        )?;
        tx.commit()?;
        Ok(())
    }
}

pub fn validate_slot_key(key: &str) -> Result<()> {
    if key.is_empty() || key.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(StoreError::InvalidSlotKey(key.to_string()));
    }
    Ok(())
}
