//! Core domain logic for TaskFlow.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use model::contact::{Contact, ContactId, ContactPatch, NewContact};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
pub use model::ValidationError;
pub use service::session::{LoadError, Session};
pub use store::category_store::{CategoryStore, SqliteCategoryStore};
pub use store::contact_store::{ContactStore, SqliteContactStore};
pub use store::memory::{MemoryCategoryStore, MemoryContactStore, MemoryTaskStore};
pub use store::task_store::{SqliteTaskStore, TaskStore};
pub use store::{StoreError, StoreResult};
pub use view::derive::{
    due_status, filter_tasks, sort_tasks, task_stats, visible_tasks, CategoryCount, DueStatus,
    TaskStats,
};
pub use view::state::{CategoryFilter, SortKey, StatusFilter, TaskViewState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
