//! Domain model for TaskFlow entities.
//!
//! # Responsibility
//! - Define the canonical records managed by the store layer.
//! - Centralize field-level validation shared by every store implementation.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID assigned at creation.
//! - `Task::completed_at` is present if and only if `Task::completed` is true.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod contact;
pub mod task;

/// Field-level validation failure shared by all entity write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// Category name is empty or whitespace-only.
    EmptyCategoryName,
    /// A required contact field is empty or whitespace-only.
    MissingContactField(&'static str),
    /// `completed_at` presence does not match the `completed` flag.
    CompletionTimestampMismatch,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyCategoryName => write!(f, "category name must not be empty"),
            Self::MissingContactField(field) => {
                write!(f, "contact field `{field}` must not be empty")
            }
            Self::CompletionTimestampMismatch => write!(
                f,
                "completed_at must be set exactly when the task is completed"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
