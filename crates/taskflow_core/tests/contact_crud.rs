use taskflow_core::db::open_db_in_memory;
use taskflow_core::{
    ContactPatch, ContactStore, NewContact, SqliteContactStore, StoreError, ValidationError,
};
use uuid::Uuid;

#[test]
fn create_round_trips_and_derives_full_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let created = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    assert_eq!(created.full_name(), "Ada Lovelace");

    let loaded = store.get(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn required_fields_are_validated() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let err = store
        .create(&NewContact::new("", "Lovelace", "ada@example.com"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::MissingContactField("first_name"))
    ));
}

#[test]
fn list_orders_by_last_then_first_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    store
        .create(&NewContact::new("Maya", "Chen", "maya@example.com"))
        .unwrap();
    store
        .create(&NewContact::new("Jonas", "Alvarez", "jonas@example.com"))
        .unwrap();
    store
        .create(&NewContact::new("Alba", "Chen", "alba@example.com"))
        .unwrap();

    let names: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|contact| contact.full_name())
        .collect();
    assert_eq!(names, vec!["Jonas Alvarez", "Alba Chen", "Maya Chen"]);
}

#[test]
fn update_can_set_and_clear_optional_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    let created = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let with_phone = store
        .update(
            created.id,
            &ContactPatch {
                phone: Some(Some("+1-555-0100".to_string())),
                ..ContactPatch::default()
            },
        )
        .unwrap();
    assert_eq!(with_phone.phone.as_deref(), Some("+1-555-0100"));

    let cleared = store
        .update(
            created.id,
            &ContactPatch {
                phone: Some(None),
                ..ContactPatch::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.phone, None);
}

#[test]
fn bulk_delete_removes_every_requested_contact() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let a = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    let b = store
        .create(&NewContact::new("Grace", "Hopper", "grace@example.com"))
        .unwrap();
    let keep = store
        .create(&NewContact::new("Alan", "Turing", "alan@example.com"))
        .unwrap();

    assert!(store.delete_many(&[a.id, b.id]).unwrap());
    let remaining = store.list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn bulk_delete_is_atomic_when_any_id_is_missing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let a = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let removed = store.delete_many(&[a.id, Uuid::new_v4()]).unwrap();
    assert!(!removed);
    // The existing contact survives: none-or-all.
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn bulk_delete_tolerates_repeated_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let a = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    let b = store
        .create(&NewContact::new("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    assert!(store.delete_many(&[a.id, a.id, b.id]).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn bulk_delete_of_empty_set_is_a_no_op_success() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    assert!(store.delete_many(&[]).unwrap());
}
