//! Derived task view: pure projection of the task collection.
//!
//! # Responsibility
//! - Hold the explicit, serializable view-state record for one UI session.
//! - Derive the filtered/sorted task list and aggregate counters from it.
//!
//! # Invariants
//! - Every function here is total over its inputs; no errors originate in
//!   this module.
//! - Aggregates are computed over the unfiltered collection.

pub mod derive;
pub mod state;
