//! Category store contract and SQLite implementation.
//!
//! Categories are small and few; the listing order is insertion order so the
//! sidebar renders them the way the user created them.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::store::{ensure_schema, parse_row_uuid, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const CATEGORY_SELECT_SQL: &str = "SELECT uuid, name, color, icon FROM categories";

const CATEGORY_COLUMNS: &[&str] = &["uuid", "name", "color", "icon"];

/// Store contract for category records.
pub trait CategoryStore {
    fn list(&self) -> StoreResult<Vec<Category>>;
    fn get(&self, id: CategoryId) -> StoreResult<Category>;
    fn create(&self, draft: &NewCategory) -> StoreResult<Category>;
    fn update(&self, id: CategoryId, patch: &CategoryPatch) -> StoreResult<Category>;
    /// Returns true iff the record existed and was removed.
    fn delete(&self, id: CategoryId) -> StoreResult<bool>;
}

/// SQLite-backed category store.
pub struct SqliteCategoryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryStore<'conn> {
    /// Wraps a migrated connection, rejecting unprepared schemas up front.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema(conn, "categories", CATEGORY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CategoryStore for SqliteCategoryStore<'_> {
    fn list(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY rowid ASC"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get(&self, id: CategoryId) -> StoreResult<Category> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_category_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn create(&self, draft: &NewCategory) -> StoreResult<Category> {
        draft.validate()?;
        let category = Category::from_new(draft, Uuid::new_v4());

        self.conn
            .execute(
                "INSERT INTO categories (uuid, name, color, icon) VALUES (?1, ?2, ?3, ?4);",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.color.as_str(),
                    category.icon.as_str(),
                ],
            )
            .map_err(|err| map_name_conflict(&category.name, err))?;

        Ok(category)
    }

    fn update(&self, id: CategoryId, patch: &CategoryPatch) -> StoreResult<Category> {
        let mut category = self.get(id)?;
        category.apply_patch(patch);
        category.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE categories SET name = ?1, color = ?2, icon = ?3 WHERE uuid = ?4;",
                params![
                    category.name.as_str(),
                    category.color.as_str(),
                    category.icon.as_str(),
                    id.to_string(),
                ],
            )
            .map_err(|err| map_name_conflict(&category.name, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(category)
    }

    fn delete(&self, id: CategoryId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

/// `name` is the only constrained column besides the primary key, so a
/// constraint failure on a write with a fresh uuid means a name collision.
fn map_name_conflict(name: &str, err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateCategoryName(name.to_string())
        }
        _ => StoreError::from(err),
    }
}

fn parse_category_row(row: &Row<'_>) -> StoreResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let category = Category {
        id: parse_row_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
        color: row.get("color")?,
        icon: row.get("icon")?,
    };
    category.validate()?;
    Ok(category)
}
