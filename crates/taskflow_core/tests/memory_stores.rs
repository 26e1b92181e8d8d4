use taskflow_core::db::open_db_in_memory;
use taskflow_core::{
    CategoryPatch, CategoryStore, ContactStore, MemoryCategoryStore, MemoryContactStore,
    MemoryTaskStore, NewCategory, NewContact, NewTask, SqliteCategoryStore, StoreError,
    TaskPatch, TaskStore, ValidationError,
};
use uuid::Uuid;

#[test]
fn fixtures_seed_all_three_collections() {
    let tasks = MemoryTaskStore::with_fixtures().unwrap();
    let categories = MemoryCategoryStore::with_fixtures().unwrap();
    let contacts = MemoryContactStore::with_fixtures().unwrap();

    assert_eq!(tasks.list().unwrap().len(), 5);
    assert_eq!(categories.list().unwrap().len(), 3);
    assert_eq!(contacts.list().unwrap().len(), 3);

    // Seeded records satisfy the same invariants enforced on writes.
    for task in tasks.list().unwrap() {
        assert_eq!(task.completed, task.completed_at.is_some());
    }
}

#[test]
fn crud_semantics_match_the_sqlite_store() {
    let store = MemoryTaskStore::new();

    let err = store.create(&NewTask::new("  ")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyTitle)
    ));

    let created = store.create(&NewTask::new("memory task")).unwrap();
    assert!(!created.completed);
    assert_eq!(store.get(created.id).unwrap(), created);

    let missing = Uuid::new_v4();
    assert!(matches!(
        store.update(missing, &TaskPatch::default()),
        Err(StoreError::NotFound(id)) if id == missing
    ));

    assert!(store.delete(created.id).unwrap());
    assert!(!store.delete(created.id).unwrap());
}

#[test]
fn search_and_category_listing_mirror_the_backend_queries() {
    let store = MemoryTaskStore::with_fixtures().unwrap();

    let hits = store.search("REPORT").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Prepare quarterly report");

    let work = store.list_by_category("Work").unwrap();
    assert_eq!(work.len(), 2);
    assert!(work.iter().all(|task| task.category.as_deref() == Some("Work")));
}

#[test]
fn contact_listing_is_sorted_by_name() {
    let store = MemoryContactStore::with_fixtures().unwrap();
    let last_names: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|contact| contact.last_name)
        .collect();
    assert_eq!(last_names, vec!["Alvarez", "Chen", "Natarajan"]);
}

#[test]
fn category_name_uniqueness_matches_the_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteCategoryStore::try_new(&conn).unwrap();
    let memory = MemoryCategoryStore::new();

    sqlite.create(&NewCategory::new("Work")).unwrap();
    memory.create(&NewCategory::new("Work")).unwrap();

    let sqlite_second = sqlite.create(&NewCategory::new("Work"));
    let memory_second = memory.create(&NewCategory::new("Work"));
    assert!(matches!(
        sqlite_second,
        Err(StoreError::DuplicateCategoryName(_))
    ));
    assert!(matches!(
        memory_second,
        Err(StoreError::DuplicateCategoryName(_))
    ));
    assert_eq!(memory.list().unwrap().len(), 1);
}

#[test]
fn renaming_onto_a_taken_name_is_rejected_in_memory() {
    let store = MemoryCategoryStore::new();
    store.create(&NewCategory::new("Work")).unwrap();
    let home = store.create(&NewCategory::new("Home")).unwrap();

    let err = store
        .update(
            home.id,
            &CategoryPatch {
                name: Some("Work".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateCategoryName(name) if name == "Work"));

    // A patch that keeps the category's own name still goes through.
    let recolored = store
        .update(
            home.id,
            &CategoryPatch {
                color: Some("#FF0000".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap();
    assert_eq!(recolored.name, "Home");
}

#[test]
fn bulk_delete_is_atomic_in_memory_too() {
    let store = MemoryContactStore::new();
    let a = store
        .create(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    let b = store
        .create(&NewContact::new("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    assert!(!store.delete_many(&[a.id, Uuid::new_v4()]).unwrap());
    assert_eq!(store.list().unwrap().len(), 2);

    // Repeated ids still name an existing record each.
    assert!(store.delete_many(&[a.id, a.id, b.id]).unwrap());
    assert!(store.list().unwrap().is_empty());
}
