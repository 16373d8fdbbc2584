//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract the task store depends on.
//! - Keep flat-file format details inside the persistence boundary.
//!
//! # Invariants
//! - Reads are permissive: malformed lines degrade field-by-field and
//!   never abort a load.
//! - Writes are strict: the canonical encoding is the only one emitted.

pub mod task_repo;
