//! Owner roster model.
//!
//! # Responsibility
//! - Keep the ordered, deduplicated list of known owner names.
//! - Own the first-run default so no other layer hard-codes it.
//!
//! # Invariants
//! - Names are appended only; removal is not supported.
//! - Duplicate detection is a case-sensitive exact match.
//! - The roster is never empty; an empty parse falls back to the
//!   default single entry.

use serde::{Deserialize, Serialize};

/// Owner assigned when no real person has claimed a task yet.
pub const DEFAULT_OWNER: &str = "No Owner";

/// Append-only, order-preserving set of owner names.
///
/// Tasks reference owners by plain string, so a task stays valid even
/// if its owner predates (or was never added to) the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRoster {
    names: Vec<String>,
}

impl OwnerRoster {
    /// Builds a roster from persisted names, dropping empties and
    /// duplicates while preserving first-seen order.
    ///
    /// An input that yields no usable names produces the default roster.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self { names: Vec::new() };
        for name in names {
            roster.add(&name.into());
        }
        if roster.names.is_empty() {
            return Self::default();
        }
        roster
    }

    /// Appends `name` if it is non-empty and not already present.
    ///
    /// Returns whether the roster changed.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    /// Case-sensitive exact membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    /// Ordered view of the roster.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// First roster entry, the shell's initial dropdown selection.
    pub fn first(&self) -> &str {
        // from_names/default keep the roster non-empty.
        self.names
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_OWNER)
    }
}

impl Default for OwnerRoster {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_OWNER.to_string()],
        }
    }
}
