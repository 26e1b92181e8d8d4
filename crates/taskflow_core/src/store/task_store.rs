//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the stable task CRUD API consumed by the session layer.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The store assigns `id` and `created_at`; new tasks start not-completed.
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
use crate::store::{
    datetime_to_db, ensure_schema, parse_row_bool, parse_row_datetime, parse_row_uuid,
    StoreError, StoreResult,
};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    category,
    priority,
    due_date,
    completed,
    created_at,
    completed_at
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "description",
    "category",
    "priority",
    "due_date",
    "completed",
    "created_at",
    "completed_at",
];

/// Store contract for task records.
///
/// `list` returns records in insertion order so that derived-view stability
/// properties are observable end to end.
pub trait TaskStore {
    fn list(&self) -> StoreResult<Vec<Task>>;
    fn get(&self, id: TaskId) -> StoreResult<Task>;
    fn create(&self, draft: &NewTask) -> StoreResult<Task>;
    fn update(&self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task>;
    /// Returns true iff the record existed and was removed.
    fn delete(&self, id: TaskId) -> StoreResult<bool>;
    /// Lists tasks whose loose category reference equals `name`.
    fn list_by_category(&self, name: &str) -> StoreResult<Vec<Task>>;
    /// Case-insensitive substring search over title and description.
    fn search(&self, query: &str) -> StoreResult<Vec<Task>>;
}

/// SQLite-backed task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a migrated connection, rejecting unprepared schemas up front.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn list(&self) -> StoreResult<Vec<Task>> {
        self.query_tasks(&format!("{TASK_SELECT_SQL} ORDER BY rowid ASC"), params![])
    }

    fn get(&self, id: TaskId) -> StoreResult<Task> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_task_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn create(&self, draft: &NewTask) -> StoreResult<Task> {
        draft.validate()?;
        let task = Task::from_new(draft, Uuid::new_v4(), Utc::now());

        self.conn.execute(
            "INSERT INTO tasks (
                uuid, title, description, category, priority,
                due_date, completed, created_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                task.category.as_deref(),
                priority_to_db(task.priority),
                task.due_date.map(datetime_to_db),
                i64::from(task.completed),
                datetime_to_db(task.created_at),
                task.completed_at.map(datetime_to_db),
            ],
        )?;

        Ok(task)
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let mut task = self.get(id)?;
        task.apply_patch(patch);
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                category = ?3,
                priority = ?4,
                due_date = ?5,
                completed = ?6,
                completed_at = ?7
             WHERE uuid = ?8;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                task.category.as_deref(),
                priority_to_db(task.priority),
                task.due_date.map(datetime_to_db),
                i64::from(task.completed),
                task.completed_at.map(datetime_to_db),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(task)
    }

    fn delete(&self, id: TaskId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn list_by_category(&self, name: &str) -> StoreResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE category = ?1 ORDER BY rowid ASC"),
            params![name],
        )
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Task>> {
        // instr() keeps substring semantics exact; LIKE would reinterpret
        // `%` and `_` in user input.
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE instr(lower(title), lower(?1)) > 0
                    OR instr(lower(coalesce(description, '')), lower(?1)) > 0
                 ORDER BY rowid ASC"
            ),
            params![query],
        )
    }
}

impl SqliteTaskStore<'_> {
    fn query_tasks(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_row_uuid(&uuid_text, "tasks.uuid")?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(text) => Some(parse_row_datetime(&text, "tasks.due_date")?),
        None => None,
    };
    let created_at_text: String = row.get("created_at")?;
    let completed_at = match row.get::<_, Option<String>>("completed_at")? {
        Some(text) => Some(parse_row_datetime(&text, "tasks.completed_at")?),
        None => None,
    };

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        priority,
        due_date,
        completed: parse_row_bool(row.get("completed")?, "tasks.completed")?,
        created_at: parse_row_datetime(&created_at_text, "tasks.created_at")?,
        completed_at,
    };
    task.validate()?;
    Ok(task)
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}
