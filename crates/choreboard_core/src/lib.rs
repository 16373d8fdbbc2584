//! Core domain logic for Choreboard.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::owner::{OwnerRoster, DEFAULT_OWNER};
pub use model::task::{
    completion_stamp_now, Task, TaskValidationError, COMPLETION_STAMP_FORMAT,
};
pub use repo::task_repo::{
    FileTaskRepository, RepoError, RepoResult, StoreContents, TaskRepository,
};
pub use service::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
