use taskflow_core::db::migrations::{apply_migrations, latest_version};
use taskflow_core::db::{open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_leaves_the_connection_at_the_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn reapplying_migrations_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
}

#[test]
fn newer_database_versions_are_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        latest_version() + 1
    ))
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn initial_schema_creates_all_entity_tables() {
    let conn = open_db_in_memory().unwrap();
    for table in ["tasks", "categories", "contacts"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "table `{table}` should exist");
    }
}
