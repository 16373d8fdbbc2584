//! Task domain model.
//!
//! # Responsibility
//! - Define the one fixed-shape task record shared by store and repo.
//! - Provide lifecycle helpers for the done/pending transition.
//!
//! # Invariants
//! - `completed_at` is only present while `done` is true.
//! - Completion stamps are opaque display strings; legacy date-only
//!   stamps round-trip unchanged through load/save.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Render format for freshly minted completion stamps.
///
/// Stamps read back from disk may be date-only; they are kept verbatim.
pub const COMPLETION_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Canonical record for one actionable item.
///
/// Persisted rows carry 2, 3, or 4 fields depending on format age, but
/// in memory there is exactly one shape; the repository decoder fills
/// the gaps with the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// User-supplied display text.
    pub text: String,
    /// Responsible party. Not required to be a roster member.
    pub owner: String,
    /// Completion flag; defaults to false.
    pub done: bool,
    /// Local completion stamp, present only while `done` is true.
    pub completed_at: Option<String>,
}

impl Task {
    /// Creates a pending task with normalized defaults.
    pub fn new(text: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            owner: owner.into(),
            done: false,
            completed_at: None,
        }
    }

    /// Marks the task done and stamps it with the current local time.
    pub fn complete(&mut self) {
        self.done = true;
        self.completed_at = Some(completion_stamp_now());
    }

    /// Returns the task to pending and clears the stamp.
    pub fn reopen(&mut self) {
        self.done = false;
        self.completed_at = None;
    }

    /// Checks shell-boundary input rules.
    ///
    /// The store itself stays permissive; callers that accept raw user
    /// input run this before mutating the store.
    ///
    /// # Errors
    /// - Empty or whitespace-only `text`.
    /// - Empty or whitespace-only `owner`.
    /// - A completion stamp on a task that is not done.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if self.owner.trim().is_empty() {
            return Err(TaskValidationError::EmptyOwner);
        }
        if self.completed_at.is_some() && !self.done {
            return Err(TaskValidationError::StampWithoutDone);
        }
        Ok(())
    }
}

/// Current local time rendered in the canonical stamp format.
pub fn completion_stamp_now() -> String {
    Local::now().format(COMPLETION_STAMP_FORMAT).to_string()
}

/// Input-rule violations surfaced before a task reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    EmptyOwner,
    StampWithoutDone,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::EmptyOwner => write!(f, "task owner cannot be empty"),
            Self::StampWithoutDone => {
                write!(f, "completion stamp present on a task that is not done")
            }
        }
    }
}

impl Error for TaskValidationError {}
