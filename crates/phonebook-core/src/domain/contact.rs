use crate::domain::ids::ContactId;
use crate::domain::name::is_valid_name;
use crate::domain::phone::is_canonical_phone;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_valid_name(&self.name) {
            return Err(CoreError::InvalidName);
        }
        if !is_canonical_phone(&self.phone) {
            return Err(CoreError::NonCanonicalPhone(self.phone.clone()));
        }
        Ok(())
    }
}

/// Contacts in display order; serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactCollection(Vec<Contact>);

impl ContactCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.0
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.0.iter().find(|contact| contact.id == id)
    }

    pub fn contains_phone(&self, phone: &str) -> bool {
        self.0.iter().any(|contact| contact.phone == phone)
    }

    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.0.iter().map(|contact| contact.id)
    }

    /// Appends `contact` unless its phone or id is already present.
    pub fn push(&mut self, contact: Contact) -> Result<(), CoreError> {
        if self.contains_phone(&contact.phone) {
            return Err(CoreError::DuplicatePhone(contact.phone));
        }
        if self.get(contact.id).is_some() {
            return Err(CoreError::DuplicateId(contact.id));
        }
        self.0.push(contact);
        Ok(())
    }

    /// Drops the contact with `id`. Unknown ids leave the collection as is.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.0.iter().position(|contact| contact.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let mut phones = HashSet::with_capacity(self.0.len());
        let mut ids = HashSet::with_capacity(self.0.len());
        for contact in &self.0 {
            contact.validate()?;
            if !phones.insert(contact.phone.as_str()) {
                return Err(CoreError::DuplicatePhone(contact.phone.clone()));
            }
            if !ids.insert(contact.id) {
                return Err(CoreError::DuplicateId(contact.id));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ContactCollection {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ContactCollection {
    type Item = Contact;
    type IntoIter = std::vec::IntoIter<Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
