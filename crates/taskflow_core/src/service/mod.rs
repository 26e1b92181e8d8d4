//! Use-case services over the store contracts.
//!
//! # Responsibility
//! - Orchestrate store calls into the session-level API the UI consumes.
//! - Keep presentation layers decoupled from storage details.

pub mod session;
