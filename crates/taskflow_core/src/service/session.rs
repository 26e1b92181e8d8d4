//! One UI session: local collections, view state, and CRUD orchestration.
//!
//! # Responsibility
//! - Load all entity collections up front (all-or-nothing, retry by
//!   reloading).
//! - Forward create/update/delete to the stores and splice the confirmed
//!   record into the local collection only after the store confirms.
//!
//! # Invariants
//! - A failed store call leaves the local collections unmodified; there are
//!   no optimistic updates to reconcile.
//! - The view accessors are pure projections of (collections, view state).

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::store::category_store::CategoryStore;
use crate::store::contact_store::ContactStore;
use crate::store::task_store::TaskStore;
use crate::store::{StoreError, StoreResult};
use crate::view::derive::{task_stats, visible_tasks, TaskStats};
use crate::view::state::TaskViewState;
use chrono::Utc;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Initial-load failure, naming the collection whose fetch failed.
///
/// The whole load is reported as failed; callers re-render nothing and may
/// retry by calling [`Session::load`] again.
#[derive(Debug)]
pub struct LoadError {
    pub entity: &'static str,
    pub source: StoreError,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load {}: {}", self.entity, self.source)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A single user session over one store implementation per entity.
///
/// The stores are interchangeable capabilities: the embedder wires either the
/// SQLite-backed set or the in-memory mock set at process start.
pub struct Session<T, C, P> {
    task_store: T,
    category_store: C,
    contact_store: P,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    contacts: Vec<Contact>,
    pub view_state: TaskViewState,
}

impl<T, C, P> Session<T, C, P>
where
    T: TaskStore,
    C: CategoryStore,
    P: ContactStore,
{
    pub fn new(task_store: T, category_store: C, contact_store: P) -> Self {
        Self {
            task_store,
            category_store,
            contact_store,
            tasks: Vec::new(),
            categories: Vec::new(),
            contacts: Vec::new(),
            view_state: TaskViewState::default(),
        }
    }

    /// Fetches all three collections.
    ///
    /// All-or-nothing: if any fetch fails the session's collections are left
    /// exactly as they were and the error names the failed entity.
    pub fn load(&mut self) -> Result<(), LoadError> {
        info!("event=session_load module=session status=start");

        let tasks = self.task_store.list().map_err(|source| {
            load_failure("tasks", source)
        })?;
        let categories = self.category_store.list().map_err(|source| {
            load_failure("categories", source)
        })?;
        let contacts = self.contact_store.list().map_err(|source| {
            load_failure("contacts", source)
        })?;

        self.tasks = tasks;
        self.categories = categories;
        self.contacts = contacts;

        info!(
            "event=session_load module=session status=ok tasks={} categories={} contacts={}",
            self.tasks.len(),
            self.categories.len(),
            self.contacts.len()
        );
        Ok(())
    }

    // --- tasks -----------------------------------------------------------

    pub fn create_task(&mut self, draft: &NewTask) -> StoreResult<Task> {
        let created = self.task_store.create(draft)?;
        self.tasks.push(created.clone());
        Ok(created)
    }

    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let updated = self.task_store.update(id, patch)?;
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Removes the task locally only when the store confirms the deletion.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let removed = self.task_store.delete(id)?;
        if removed {
            self.tasks.retain(|task| task.id != id);
        }
        Ok(removed)
    }

    /// Flips completion via the two-field patch that keeps the
    /// `completed`/`completed_at` invariant intact.
    pub fn toggle_task_completed(&mut self, id: TaskId) -> StoreResult<Task> {
        let current = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let patch = current.completion_patch(Utc::now());
        self.update_task(id, &patch)
    }

    // --- categories ------------------------------------------------------

    pub fn create_category(&mut self, draft: &NewCategory) -> StoreResult<Category> {
        let created = self.category_store.create(draft)?;
        self.categories.push(created.clone());
        Ok(created)
    }

    pub fn update_category(
        &mut self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> StoreResult<Category> {
        let updated = self.category_store.update(id, patch)?;
        if let Some(slot) = self.categories.iter_mut().find(|category| category.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<bool> {
        let removed = self.category_store.delete(id)?;
        if removed {
            self.categories.retain(|category| category.id != id);
        }
        Ok(removed)
    }

    // --- contacts --------------------------------------------------------

    pub fn create_contact(&mut self, draft: &NewContact) -> StoreResult<Contact> {
        let created = self.contact_store.create(draft)?;
        self.contacts.push(created.clone());
        Ok(created)
    }

    pub fn update_contact(
        &mut self,
        id: ContactId,
        patch: &ContactPatch,
    ) -> StoreResult<Contact> {
        let updated = self.contact_store.update(id, patch)?;
        if let Some(slot) = self.contacts.iter_mut().find(|contact| contact.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete_contact(&mut self, id: ContactId) -> StoreResult<bool> {
        let removed = self.contact_store.delete(id)?;
        if removed {
            self.contacts.retain(|contact| contact.id != id);
        }
        Ok(removed)
    }

    /// Bulk removal. The store guarantees all-or-nothing semantics, so the
    /// local collection is pruned only on a confirmed full removal.
    pub fn delete_contacts(&mut self, ids: &[ContactId]) -> StoreResult<bool> {
        let removed = self.contact_store.delete_many(ids)?;
        if removed {
            self.contacts.retain(|contact| !ids.contains(&contact.id));
        }
        Ok(removed)
    }

    // --- view ------------------------------------------------------------

    /// The ordered subset to render under the current view state.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(&self.tasks, &self.view_state)
    }

    /// Aggregate counters over the full (unfiltered) collection.
    pub fn stats(&self) -> TaskStats {
        task_stats(&self.tasks, &self.categories)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

fn load_failure(entity: &'static str, source: StoreError) -> LoadError {
    error!("event=session_load module=session status=error entity={entity} error={source}");
    LoadError { entity, source }
}
