use anyhow::Result;
use phonebook_service::ContactService;
use phonebook_store::repo::ContactsSlot;
use phonebook_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod backup;
pub mod completions;
pub mod contacts;

pub type Book<'a> = ContactService<ContactsSlot<'a>>;

pub struct Context<'a> {
    pub store: &'a Store,
    pub book: &'a Book<'a>,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
