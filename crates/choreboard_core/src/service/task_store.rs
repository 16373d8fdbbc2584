//! Task store: the stateful owner of tasks, roster, and dirty flag.
//!
//! # Responsibility
//! - Hold the ordered task sequence and owner roster in memory.
//! - Route every mutation through a named operation and track
//!   unsaved-changes state centrally.
//!
//! # Invariants
//! - Snapshots handed out are immutable; callers never mutate tasks
//!   in place.
//! - `dirty` is set by every mutating operation and cleared only by a
//!   successful save or reload.
//! - Out-of-range indices are no-ops, not errors.
//! - `add_owner` is the one operation that persists immediately; all
//!   other mutations wait for an explicit save.

use crate::model::owner::OwnerRoster;
use crate::model::task::Task;
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::{info, warn};

/// In-memory task/owner state over a pluggable repository.
///
/// Constructed once at startup via [`TaskStore::open`], which performs
/// the initial load; a missing file yields empty tasks and the default
/// roster.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    owners: OwnerRoster,
    dirty: bool,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Opens the store and loads persisted state.
    ///
    /// # Errors
    /// Only irrecoverable I/O failures; a missing file is not one.
    pub fn open(repo: R) -> RepoResult<Self> {
        let contents = repo.load()?;
        Ok(Self {
            repo,
            tasks: contents.tasks,
            owners: contents.owners,
            dirty: false,
        })
    }

    /// Re-reads persisted state, replacing in-memory contents.
    ///
    /// Loading twice without an intervening mutation or save yields
    /// identical state. Clears the dirty flag.
    pub fn load(&mut self) -> RepoResult<()> {
        let contents = self.repo.load()?;
        self.tasks = contents.tasks;
        self.owners = contents.owners;
        self.dirty = false;
        Ok(())
    }

    /// Rewrites the whole persisted file from memory.
    ///
    /// On failure the in-memory state is untouched and stays dirty so
    /// the caller may retry.
    pub fn save(&mut self) -> RepoResult<()> {
        self.repo.save(&self.owners, &self.tasks)?;
        self.dirty = false;
        Ok(())
    }

    /// Ordered immutable snapshot of the task sequence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Ordered owner roster.
    pub fn owners(&self) -> &[String] {
        self.owners.names()
    }

    /// First roster entry, the shell's initial selection.
    pub fn default_owner(&self) -> &str {
        self.owners.first()
    }

    /// Whether unsaved mutations exist since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a task to the end of the sequence.
    ///
    /// Permissive on purpose: the owner is not checked against the
    /// roster, matching the historical behavior callers rely on.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.dirty = true;
    }

    /// Removes the task at `index`, shifting later tasks down.
    ///
    /// Returns whether a task was removed; out-of-range is a no-op.
    pub fn delete_task(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return false;
        }
        self.tasks.remove(index);
        self.dirty = true;
        true
    }

    /// Flips the done flag of the task at `index`.
    ///
    /// Pending -> Done stamps the current local time; Done -> Pending
    /// clears the stamp. Returns whether a task was toggled.
    pub fn toggle_done(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        if task.done {
            task.reopen();
        } else {
            task.complete();
        }
        self.dirty = true;
        true
    }

    /// Re-owns the task at `index`, preserving done state and stamp.
    ///
    /// The new owner is not validated against the roster. Returns
    /// whether a task was updated.
    pub fn change_owner(&mut self, index: usize, owner: &str) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        task.owner = owner.to_string();
        self.dirty = true;
        true
    }

    /// Appends an owner and immediately saves the whole store.
    ///
    /// This is the one mutation that does not wait for an explicit
    /// save. Returns `Ok(false)` without touching disk when the name
    /// is blank or already present (case-sensitive).
    ///
    /// # Errors
    /// A failed save keeps the roster addition in memory, leaves the
    /// store dirty, and reports the I/O error for the caller to show.
    pub fn add_owner(&mut self, name: &str) -> RepoResult<bool> {
        if !self.owners.add(name) {
            return Ok(false);
        }
        self.dirty = true;
        match self.save() {
            Ok(()) => {
                info!("event=add_owner module=store status=ok");
                Ok(true)
            }
            Err(err) => {
                warn!("event=add_owner module=store status=save_failed error={err}");
                Err(err)
            }
        }
    }
}
