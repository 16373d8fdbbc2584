//! Domain model for tasks and their owners.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//! - Own the append-only owner roster and its first-run default.
//!
//! # Invariants
//! - A completion stamp is only ever present on a done task.
//! - Legacy persisted field counts never leak into these shapes; the
//!   repository layer normalizes them before construction.

pub mod owner;
pub mod task;
