//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that exercises the mock-mode stores and the
//!   derived-view pipeline end to end.
//! - Keep output deterministic enough for quick local sanity checks.

use taskflow_core::{
    MemoryCategoryStore, MemoryContactStore, MemoryTaskStore, Session, StatusFilter,
};

fn main() {
    if let Err(message) = run() {
        eprintln!("taskflow: {message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let tasks = MemoryTaskStore::with_fixtures().map_err(|err| err.to_string())?;
    let categories = MemoryCategoryStore::with_fixtures().map_err(|err| err.to_string())?;
    let contacts = MemoryContactStore::with_fixtures().map_err(|err| err.to_string())?;

    let mut session = Session::new(tasks, categories, contacts);
    session.load().map_err(|err| err.to_string())?;

    let stats = session.stats();
    println!(
        "taskflow_core version={} tasks={} completed={} ({}%)",
        taskflow_core::core_version(),
        stats.total_count,
        stats.completed_count,
        stats.completion_percentage
    );
    for count in &stats.category_counts {
        println!("  category {}: {} task(s)", count.name, count.count);
    }

    session.view_state.filter_status = StatusFilter::Active;
    println!("active tasks by due date:");
    for task in session.visible_tasks() {
        let due = task
            .due_date
            .map(|date| date.to_rfc3339())
            .unwrap_or_else(|| "no deadline".to_string());
        println!("  [{:?}] {} (due: {due})", task.priority, task.title);
    }

    Ok(())
}
