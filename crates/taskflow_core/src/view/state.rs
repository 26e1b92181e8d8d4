//! Serializable view state for one UI session.
//!
//! The original UI held these flags in component state; keeping them in one
//! explicit record lets the derivation pipeline stay a pure function of
//! (collection, state).

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// Category selection: everything, or one category by display name.
///
/// Serialized as a plain string where `"all"` is the sentinel, matching the
/// external schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Name(String),
}

impl CategoryFilter {
    /// Whether a task with the given loose category reference passes.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Name(name) => category == Some(name.as_str()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Name(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Name(name) => name,
        }
    }
}

/// Completion-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

/// Sort key for the derived list.
///
/// The view state carries `Option<SortKey>`; `None` is the typed rendering of
/// an unknown sort value and leaves the input order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    DueDate,
    Priority,
    Created,
}

/// Filter/sort/search state plus the form/modal flags of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskViewState {
    pub selected_category: CategoryFilter,
    pub search_term: String,
    pub filter_status: StatusFilter,
    pub sort_by: Option<SortKey>,
    pub show_task_form: bool,
    pub editing_task: Option<TaskId>,
}

impl Default for TaskViewState {
    fn default() -> Self {
        Self {
            selected_category: CategoryFilter::All,
            search_term: String::new(),
            filter_status: StatusFilter::All,
            // The UI opens sorted by due date.
            sort_by: Some(SortKey::DueDate),
            show_task_form: false,
            editing_task: None,
        }
    }
}

impl TaskViewState {
    /// Whether any filter narrows the view (drives the empty-state copy).
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || self.filter_status != StatusFilter::All
            || self.selected_category != CategoryFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, StatusFilter, TaskViewState};

    #[test]
    fn category_filter_round_trips_through_the_all_sentinel() {
        assert_eq!(CategoryFilter::from("all".to_string()), CategoryFilter::All);
        assert_eq!(String::from(CategoryFilter::All), "all");
        assert_eq!(
            CategoryFilter::from("Work".to_string()),
            CategoryFilter::Name("Work".to_string())
        );
    }

    #[test]
    fn default_state_has_no_active_filters() {
        let state = TaskViewState::default();
        assert!(!state.has_active_filters());

        let narrowed = TaskViewState {
            filter_status: StatusFilter::Active,
            ..TaskViewState::default()
        };
        assert!(narrowed.has_active_filters());
    }
}
