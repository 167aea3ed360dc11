use phonebook_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    assert_eq!(store.schema_version().expect("schema version"), 1);
}

#[test]
fn migrations_create_slots_table() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
        .expect("count slots");
    assert_eq!(count, 0);
}

#[test]
fn newer_schema_is_rejected() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
        .connection()
        .execute("UPDATE phonebook_schema SET version = 99;", [])
        .expect("bump version");

    let err = store.migrate().unwrap_err();
    assert!(err.to_string().contains("newer than available migrations"));
}
