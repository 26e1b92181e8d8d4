//! In-memory store implementations (the mock mode).
//!
//! # Responsibility
//! - Mirror the observable semantics of the SQLite stores over plain vectors.
//! - Optionally seed collections from embedded fixture data, the way the
//!   original mock mode shipped static seed records.
//!
//! # Invariants
//! - Store-assigned fields (`id`, `created_at`) behave exactly like the
//!   backend-role implementation.
//! - Failed operations never leave a collection partially mutated.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::store::category_store::CategoryStore;
use crate::store::contact_store::ContactStore;
use crate::store::task_store::TaskStore;
use crate::store::{StoreError, StoreResult};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const TASK_FIXTURES: &str = include_str!("fixtures/tasks.json");
const CATEGORY_FIXTURES: &str = include_str!("fixtures/categories.json");
const CONTACT_FIXTURES: &str = include_str!("fixtures/contacts.json");

fn lock<T>(rows: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    // A poisoned lock only means another caller panicked mid-read; the data
    // itself is still a plain vector.
    rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_fixtures<T: serde::de::DeserializeOwned>(
    raw: &'static str,
    context: &str,
) -> StoreResult<Vec<T>> {
    serde_json::from_str(raw)
        .map_err(|err| StoreError::InvalidData(format!("invalid {context} fixtures: {err}")))
}

/// In-memory task store.
#[derive(Default)]
pub struct MemoryTaskStore {
    rows: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded from the embedded fixture data.
    pub fn with_fixtures() -> StoreResult<Self> {
        Ok(Self {
            rows: Mutex::new(parse_fixtures(TASK_FIXTURES, "task")?),
        })
    }
}

impl TaskStore for MemoryTaskStore {
    fn list(&self) -> StoreResult<Vec<Task>> {
        Ok(lock(&self.rows).clone())
    }

    fn get(&self, id: TaskId) -> StoreResult<Task> {
        lock(&self.rows)
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, draft: &NewTask) -> StoreResult<Task> {
        draft.validate()?;
        let task = Task::from_new(draft, Uuid::new_v4(), Utc::now());
        lock(&self.rows).push(task.clone());
        Ok(task)
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = slot.clone();
        updated.apply_patch(patch);
        updated.validate()?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: TaskId) -> StoreResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|task| task.id != id);
        Ok(rows.len() < before)
    }

    fn list_by_category(&self, name: &str) -> StoreResult<Vec<Task>> {
        Ok(lock(&self.rows)
            .iter()
            .filter(|task| task.category.as_deref() == Some(name))
            .cloned()
            .collect())
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Task>> {
        let needle = query.to_lowercase();
        Ok(lock(&self.rows)
            .iter()
            .filter(|task| {
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&needle)
            })
            .cloned()
            .collect())
    }
}

/// In-memory category store.
#[derive(Default)]
pub struct MemoryCategoryStore {
    rows: Mutex<Vec<Category>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures() -> StoreResult<Self> {
        Ok(Self {
            rows: Mutex::new(parse_fixtures(CATEGORY_FIXTURES, "category")?),
        })
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn list(&self) -> StoreResult<Vec<Category>> {
        Ok(lock(&self.rows).clone())
    }

    fn get(&self, id: CategoryId) -> StoreResult<Category> {
        lock(&self.rows)
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, draft: &NewCategory) -> StoreResult<Category> {
        draft.validate()?;
        let category = Category::from_new(draft, Uuid::new_v4());

        let mut rows = lock(&self.rows);
        // Names are a unique display key, same as the backend schema.
        if rows.iter().any(|existing| existing.name == category.name) {
            return Err(StoreError::DuplicateCategoryName(category.name));
        }
        rows.push(category.clone());
        Ok(category)
    }

    fn update(&self, id: CategoryId, patch: &CategoryPatch) -> StoreResult<Category> {
        let mut rows = lock(&self.rows);
        let index = rows
            .iter()
            .position(|category| category.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = rows[index].clone();
        updated.apply_patch(patch);
        updated.validate()?;
        if rows
            .iter()
            .any(|other| other.id != id && other.name == updated.name)
        {
            return Err(StoreError::DuplicateCategoryName(updated.name));
        }
        rows[index] = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: CategoryId) -> StoreResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|category| category.id != id);
        Ok(rows.len() < before)
    }
}

/// In-memory contact store.
#[derive(Default)]
pub struct MemoryContactStore {
    rows: Mutex<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures() -> StoreResult<Self> {
        Ok(Self {
            rows: Mutex::new(parse_fixtures(CONTACT_FIXTURES, "contact")?),
        })
    }
}

impl ContactStore for MemoryContactStore {
    fn list(&self) -> StoreResult<Vec<Contact>> {
        let mut contacts = lock(&self.rows).clone();
        contacts.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(contacts)
    }

    fn get(&self, id: ContactId) -> StoreResult<Contact> {
        lock(&self.rows)
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, draft: &NewContact) -> StoreResult<Contact> {
        draft.validate()?;
        let contact = Contact::from_new(draft, Uuid::new_v4());
        lock(&self.rows).push(contact.clone());
        Ok(contact)
    }

    fn update(&self, id: ContactId, patch: &ContactPatch) -> StoreResult<Contact> {
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = slot.clone();
        updated.apply_patch(patch);
        updated.validate()?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: ContactId) -> StoreResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|contact| contact.id != id);
        Ok(rows.len() < before)
    }

    fn delete_many(&self, ids: &[ContactId]) -> StoreResult<bool> {
        if ids.is_empty() {
            return Ok(true);
        }

        // Repeated ids in the request refer to one record each.
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut rows = lock(&self.rows);
        let matched = rows
            .iter()
            .filter(|contact| unique.contains(&contact.id))
            .count();
        if matched != unique.len() {
            return Ok(false);
        }

        rows.retain(|contact| !unique.contains(&contact.id));
        Ok(true)
    }
}
