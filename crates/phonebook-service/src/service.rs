use crate::error::{ContactError, Result};
use phonebook_core::time::now_millis;
use phonebook_core::{
    is_valid_phone, normalize_name, normalize_phone, Contact, ContactCollection, ContactId,
};
use phonebook_store::ContactStore;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const DEFAULT_ADD_LATENCY: Duration = Duration::from_millis(300);
pub const DEFAULT_DELETE_LATENCY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub add_latency: Duration,
    pub delete_latency: Duration,
}

impl ServiceOptions {
    pub fn immediate() -> Self {
        Self {
            add_latency: Duration::ZERO,
            delete_latency: Duration::ZERO,
        }
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            add_latency: DEFAULT_ADD_LATENCY,
            delete_latency: DEFAULT_DELETE_LATENCY,
        }
    }
}

/// What a front end calls: submit the add form, delete one entry, or load
/// the list for display.
#[allow(async_fn_in_trait)]
pub trait ContactBook {
    async fn on_submit(&self, name: &str, phone: &str) -> Result<Contact>;
    async fn on_delete(&self, id: ContactId) -> Result<ContactCollection>;
    fn on_load(&self) -> Result<ContactCollection>;
}

pub struct ContactService<S> {
    store: S,
    options: ServiceOptions,
    // Held across each load/modify/save so concurrent mutations cannot drop
    // each other's writes.
    write_lock: Mutex<()>,
}

impl<S: ContactStore> ContactService<S> {
    pub fn new(store: S, options: ServiceOptions) -> Self {
        Self {
            store,
            options,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_contacts(&self) -> Result<ContactCollection> {
        Ok(self.store.load()?)
    }

    /// Validates, normalizes and appends a contact.
    ///
    /// Validation and duplicate failures never write; success writes the
    /// snapshot exactly once.
    pub async fn add_contact(&self, name: &str, raw_phone: &str) -> Result<Contact> {
        let name = normalize_name(name).map_err(|err| {
            debug!("rejected contact: invalid name");
            ContactError::from(err)
        })?;
        let raw_phone = raw_phone.trim();
        if !is_valid_phone(raw_phone) {
            debug!("rejected contact: invalid phone");
            return Err(ContactError::InvalidPhone);
        }
        let phone = normalize_phone(raw_phone);

        pause(self.options.add_latency).await;
        let _guard = self.write_lock.lock().await;

        let mut contacts = self.store.load()?;
        let contact = Contact {
            id: ContactId::next(contacts.ids(), now_millis()),
            name,
            phone,
        };
        if let Err(err) = contacts.push(contact.clone()) {
            debug!(id = %contact.id, phone = %contact.phone, error = %err, "rejected contact");
            return Err(err.into());
        }
        self.store.save(&contacts)?;

        info!(id = %contact.id, total = contacts.len(), "contact added");
        Ok(contact)
    }

    /// Removes the contact with `id`; an unknown id is a successful no-op.
    pub async fn delete_contact(&self, id: ContactId) -> Result<ContactCollection> {
        pause(self.options.delete_latency).await;
        let _guard = self.write_lock.lock().await;

        let mut contacts = self.store.load()?;
        let removed = contacts.remove(id);
        self.store.save(&contacts)?;

        if removed.is_some() {
            info!(id = %id, total = contacts.len(), "contact deleted");
        } else {
            debug!(id = %id, "delete of unknown contact id");
        }
        Ok(contacts)
    }
}

async fn pause(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

impl<S: ContactStore> ContactBook for ContactService<S> {
    async fn on_submit(&self, name: &str, phone: &str) -> Result<Contact> {
        self.add_contact(name, phone).await
    }

    async fn on_delete(&self, id: ContactId) -> Result<ContactCollection> {
        self.delete_contact(id).await
    }

    fn on_load(&self) -> Result<ContactCollection> {
        self.load_contacts()
    }
}
