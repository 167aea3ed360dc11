use phonebook_core::{Contact, ContactCollection, ContactId};
use phonebook_store::error::StoreError;
use phonebook_store::{ContactStore, Store};
use std::path::PathBuf;
use tempfile::TempDir;

fn seeded_store(db_path: &std::path::Path) -> Store {
    let store = Store::open(db_path).expect("open store");
    store.migrate().expect("migrate");
    let mut contacts = ContactCollection::new();
    contacts
        .push(Contact {
            id: ContactId(1),
            name: "Ravi".to_string(),
            phone: "+91 9123456780".to_string(),
        })
        .expect("push");
    store.contacts().save(&contacts).expect("save");
    store
}

#[test]
fn backup_creates_readable_snapshot() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("phonebook.sqlite3");
    let backup_path = temp.path().join("backups").join("backup.sqlite3");

    let store = seeded_store(&db_path);
    store.backup_to(&backup_path).expect("backup");
    assert!(backup_path.exists());

    let backup = Store::open(&backup_path).expect("open backup");
    let contacts = backup.contacts().load().expect("load contacts");
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts.as_slice()[0].name, "Ravi");
}

#[test]
fn backup_rejects_database_path() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("phonebook.sqlite3");
    let store = seeded_store(&db_path);

    let err = store.backup_to(&db_path).expect_err("backup should fail");
    assert!(matches!(err, StoreError::InvalidBackupPath(_)));
}

#[test]
fn backup_rejects_sidecar_paths() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("phonebook.sqlite3");
    let store = seeded_store(&db_path);

    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let err = store
            .backup_to(&PathBuf::from(sidecar))
            .expect_err("backup should fail");
        assert!(matches!(err, StoreError::InvalidBackupPath(_)));
    }
}

#[test]
fn backup_of_in_memory_store_succeeds() {
    let temp = TempDir::new().expect("temp dir");
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let backup_path = temp.path().join("memory.sqlite3");
    store.backup_to(&backup_path).expect("backup");

    let backup = Store::open(&backup_path).expect("open backup");
    assert!(backup.contacts().load().expect("load").is_empty());
}
