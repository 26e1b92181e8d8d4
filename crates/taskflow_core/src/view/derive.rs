//! Filter → sort → aggregate pipeline over the task collection.
//!
//! # Invariants
//! - Filter predicates are AND-combined.
//! - Sorting is stable: ties keep their relative input order.
//! - Aggregates are computed over the full, unfiltered collection.

use crate::model::category::Category;
use crate::model::task::Task;
use crate::view::state::{SortKey, TaskViewState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Display classification of a task's due date relative to "now".
///
/// Used for grouping/badges only, never for filtering. Calendar-day
/// comparison is done in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    /// Due on the same calendar day as `now`.
    Today,
    /// Strictly before `now` and not today.
    Overdue,
    /// Due later.
    Upcoming,
    /// No deadline.
    None,
}

/// Classifies a due date against `now`.
pub fn due_status(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DueStatus {
    let Some(due) = due_date else {
        return DueStatus::None;
    };
    if due.date_naive() == now.date_naive() {
        DueStatus::Today
    } else if due < now {
        DueStatus::Overdue
    } else {
        DueStatus::Upcoming
    }
}

/// Applies the view state's filter predicates, preserving input order.
///
/// A task passes when its category matches the selection (or the selection is
/// `All`), the search term is contained case-insensitively in its title or
/// description (a missing description counts as empty), and its completion
/// state passes the status filter.
pub fn filter_tasks<'a>(tasks: &'a [Task], state: &TaskViewState) -> Vec<&'a Task> {
    let needle = state.search_term.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            state.selected_category.matches(task.category.as_deref())
                && matches_search(task, &needle)
                && state.filter_status.matches(task.completed)
        })
        .collect()
}

fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(needle)
        || task
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(needle)
}

/// Stable in-place sort. `None` means no reordering.
///
/// - `DueDate`: ascending; undated tasks after all dated ones, undated pairs
///   compare equal.
/// - `Priority`: descending by weight (high, medium, low).
/// - `Created`: newest first.
pub fn sort_tasks(tasks: &mut [&Task], sort_by: Option<SortKey>) {
    let Some(key) = sort_by else {
        return;
    };

    match key {
        SortKey::DueDate => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        }),
        SortKey::Priority => {
            tasks.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()))
        }
        SortKey::Created => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// The ordered subset the UI renders: filter, then sort.
pub fn visible_tasks<'a>(tasks: &'a [Task], state: &TaskViewState) -> Vec<&'a Task> {
    let mut visible = filter_tasks(tasks, state);
    sort_tasks(&mut visible, state.sort_by);
    visible
}

/// Per-category task count, in category input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Aggregate counters over the unfiltered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub completed_count: usize,
    pub total_count: usize,
    /// `round(completed / total * 100)`; 0 for an empty collection.
    pub completion_percentage: u8,
    pub category_counts: Vec<CategoryCount>,
}

/// Computes aggregates over the full task collection.
pub fn task_stats(tasks: &[Task], categories: &[Category]) -> TaskStats {
    let completed_count = tasks.iter().filter(|task| task.completed).count();
    let total_count = tasks.len();
    let completion_percentage = if total_count == 0 {
        0
    } else {
        (completed_count as f64 / total_count as f64 * 100.0).round() as u8
    };

    let category_counts = categories
        .iter()
        .map(|category| CategoryCount {
            name: category.name.clone(),
            count: tasks
                .iter()
                .filter(|task| task.category.as_deref() == Some(category.name.as_str()))
                .count(),
        })
        .collect();

    TaskStats {
        completed_count,
        total_count,
        completion_percentage,
        category_counts,
    }
}
