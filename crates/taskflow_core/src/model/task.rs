//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record, its creation draft and update patch.
//! - Enforce the completion invariant on every write path.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is assigned once by the store and never changes.
//! - `completed_at` is `Some` exactly when `completed` is true.

use crate::model::{is_blank, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Task urgency level.
///
/// Ordering follows the weight used by the priority sort: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric weight used for descending priority sorts.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Canonical task record as confirmed by a store.
///
/// `category` is a loose reference to a [`Category`](crate::model::category::Category)
/// **name**, not an id. Renaming or deleting a category can orphan the
/// reference; that matches the external data model and is left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Materializes a confirmed record from a draft plus store-assigned fields.
    pub fn from_new(draft: &NewTask, id: TaskId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            priority: draft.priority,
            due_date: draft.due_date,
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Validates field-level constraints and the completion invariant.
    ///
    /// # Errors
    /// - [`ValidationError::EmptyTitle`] when the title is blank.
    /// - [`ValidationError::CompletionTimestampMismatch`] when `completed_at`
    ///   presence disagrees with `completed`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::EmptyTitle);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(ValidationError::CompletionTimestampMismatch);
        }
        Ok(())
    }

    /// Applies a patch in place. Does not validate; callers validate after.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
    }

    /// Derives the two-field patch that flips completion state.
    ///
    /// Transitioning to completed stamps `completed_at = now`; transitioning
    /// back clears it, keeping the completion invariant intact.
    pub fn completion_patch(&self, now: DateTime<Utc>) -> TaskPatch {
        if self.completed {
            TaskPatch {
                completed: Some(false),
                completed_at: Some(None),
                ..TaskPatch::default()
            }
        } else {
            TaskPatch {
                completed: Some(true),
                completed_at: Some(Some(now)),
                ..TaskPatch::default()
            }
        }
    }
}

/// Creation draft. The store assigns `id` and `created_at`; new tasks always
/// start not-completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a draft with the given title and defaults elsewhere.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validates draft fields before the store materializes a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial update. `None` leaves a field alone; for nullable fields the inner
/// option distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Priority, Task, TaskPatch};
    use crate::model::ValidationError;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_task() -> Task {
        Task::from_new(&NewTask::new("write report"), Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn priority_weights_are_ordered() {
        assert!(Priority::High.weight() > Priority::Medium.weight());
        assert!(Priority::Medium.weight() > Priority::Low.weight());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn blank_title_fails_validation() {
        let mut task = sample_task();
        task.title = "   ".to_string();
        assert_eq!(task.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn completion_invariant_is_enforced() {
        let mut task = sample_task();
        task.completed = true;
        assert_eq!(
            task.validate(),
            Err(ValidationError::CompletionTimestampMismatch)
        );

        task.completed_at = Some(Utc::now());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn completion_patch_round_trips() {
        let mut task = sample_task();
        let now = Utc::now();

        task.apply_patch(&task.completion_patch(now));
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now));
        assert!(task.validate().is_ok());

        task.apply_patch(&task.completion_patch(now));
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn patch_can_clear_nullable_fields() {
        let mut task = sample_task();
        task.description = Some("draft".to_string());
        task.due_date = Some(Utc::now());

        task.apply_patch(&TaskPatch {
            description: Some(None),
            due_date: Some(None),
            ..TaskPatch::default()
        });
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }
}
