//! Core use-case services.
//!
//! # Responsibility
//! - Hold the in-memory task/owner state for the process lifetime.
//! - Keep shell layers decoupled from storage details.

pub mod task_store;
