//! Store layer: per-entity CRUD contracts and their implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts (`TaskStore`,
//!   `CategoryStore`, `ContactStore`).
//! - Provide two interchangeable implementations per contract: SQLite-backed
//!   (the backend role) and in-memory (the mock role, seedable from fixtures).
//!
//! # Invariants
//! - Write paths validate records before persistence.
//! - SQLite stores reject unmigrated connections at construction time.
//! - Both implementations expose identical observable semantics.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod category_store;
pub mod contact_store;
pub mod memory;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error covering the external contract's taxonomy:
/// transport (`Db`), validation, and missing-record failures.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Uuid),
    /// Category name is already taken by another record.
    DuplicateCategoryName(String),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::DuplicateCategoryName(name) => {
                write!(f, "category name `{name}` already exists")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is older than required {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies that a connection is migrated and carries the table/columns a
/// SQLite store depends on. Called from every store's `try_new`.
pub(crate) fn ensure_schema(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> StoreResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }

    if present.is_empty() {
        return Err(StoreError::MissingRequiredTable(table));
    }
    for column in columns {
        if !present.iter().any(|name| name == column) {
            return Err(StoreError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

pub(crate) fn parse_row_uuid(text: &str, context: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{text}` in {context}")))
}

pub(crate) fn parse_row_datetime(text: &str, context: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidData(format!("invalid timestamp `{text}` in {context}")))
}

pub(crate) fn datetime_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(crate) fn parse_row_bool(value: i64, context: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid boolean value `{other}` in {context}"
        ))),
    }
}
