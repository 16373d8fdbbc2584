//! Task repository contract and flat-file implementation.
//!
//! # Responsibility
//! - Provide stable load/save APIs over the persisted task file.
//! - Keep the line format (header + pipe-delimited rows) in one place.
//!
//! # Invariants
//! - A missing file is not an error; it loads as default contents.
//! - Task lines with 4, 3, 2, or 1 fields all decode; missing fields
//!   take canonical defaults and bad lines never abort the load.
//! - Saves rewrite the whole file via write-temp-then-rename so a
//!   failed write leaves the previous file intact.

use crate::model::owner::{OwnerRoster, DEFAULT_OWNER};
use crate::model::task::Task;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Prefix marking the roster header line.
const OWNERS_PREFIX: &str = "OWNERS:";
/// Field separator inside a task line.
const FIELD_SEPARATOR: char = '|';
/// Canonical done encodings, written by `save`.
const DONE_TRUE: &str = "1";
const DONE_FALSE: &str = "0";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for the task file.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "task file I/O failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Everything one load returns: the roster plus the ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreContents {
    pub owners: OwnerRoster,
    pub tasks: Vec<Task>,
}

/// Load/save contract the task store depends on.
///
/// Kept as a trait so the store service stays storage-agnostic and
/// tests can substitute failing or in-memory implementations.
pub trait TaskRepository {
    fn load(&self) -> RepoResult<StoreContents>;
    fn save(&self, owners: &OwnerRoster, tasks: &[Task]) -> RepoResult<()>;
}

/// Flat-file repository over the pipe-delimited task format.
pub struct FileTaskRepository {
    path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> RepoResult<StoreContents> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=load module=repo status=ok path={} detail=missing_file_defaults",
                    self.path.display()
                );
                return Ok(StoreContents::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let contents = decode_contents(&raw);
        info!(
            "event=load module=repo status=ok path={} owners={} tasks={}",
            self.path.display(),
            contents.owners.names().len(),
            contents.tasks.len()
        );
        Ok(contents)
    }

    fn save(&self, owners: &OwnerRoster, tasks: &[Task]) -> RepoResult<()> {
        let body = encode_contents(owners, tasks);

        // Whole-file rewrite through a sibling temp file so the prior
        // contents survive any failure before the rename lands.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, body).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error(err)
        })?;

        info!(
            "event=save module=repo status=ok path={} owners={} tasks={}",
            self.path.display(),
            owners.names().len(),
            tasks.len()
        );
        Ok(())
    }
}

fn encode_contents(owners: &OwnerRoster, tasks: &[Task]) -> String {
    let mut out = String::new();
    out.push_str(OWNERS_PREFIX);
    out.push_str(&owners.names().join(","));
    out.push('\n');
    for task in tasks {
        out.push_str(&encode_task_line(task));
        out.push('\n');
    }
    out
}

fn encode_task_line(task: &Task) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        task.text,
        task.owner,
        if task.done { DONE_TRUE } else { DONE_FALSE },
        task.completed_at.as_deref().unwrap_or(""),
        sep = FIELD_SEPARATOR,
    )
}

fn decode_contents(raw: &str) -> StoreContents {
    let mut lines = raw.lines().peekable();

    let owners = match lines.peek() {
        Some(first) if first.starts_with(OWNERS_PREFIX) => {
            let header = lines.next().unwrap_or_default();
            decode_owner_header(header)
        }
        // No header: default roster, every line is a task line.
        _ => OwnerRoster::default(),
    };

    let mut tasks = Vec::new();
    for line in lines {
        match decode_task_line(line) {
            Some(task) => tasks.push(task),
            None => {
                if !line.trim().is_empty() {
                    warn!("event=load module=repo status=skip detail=unusable_line");
                }
            }
        }
    }

    StoreContents { owners, tasks }
}

fn decode_owner_header(header: &str) -> OwnerRoster {
    let names = header
        .strip_prefix(OWNERS_PREFIX)
        .unwrap_or_default()
        .split(',');
    OwnerRoster::from_names(names)
}

/// Decodes one task line, tolerating every historical arity.
///
/// - 4 fields: text, owner, done, stamp (empty stamp means absent).
/// - 3 fields: text, owner, done.
/// - 2 fields: text, owner (not done).
/// - 1 non-empty field: bare text owned by [`DEFAULT_OWNER`].
/// - Blank line: skipped.
///
/// A stamp is kept only when the done field decodes true, restoring
/// the stamp-implies-done invariant on the way in.
fn decode_task_line(line: &str) -> Option<Task> {
    if line.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let (text, owner, done, stamp) = match fields.as_slice() {
        [text, owner, done, stamp, ..] => (*text, *owner, decode_done(done), Some(*stamp)),
        [text, owner, done] => (*text, *owner, decode_done(done), None),
        [text, owner] => (*text, *owner, false, None),
        [text] => (*text, DEFAULT_OWNER, false, None),
        [] => return None,
    };

    let completed_at = match (done, stamp) {
        (true, Some(stamp)) if !stamp.is_empty() => Some(stamp.to_string()),
        _ => None,
    };

    Some(Task {
        text: text.to_string(),
        owner: owner.to_string(),
        done,
        completed_at,
    })
}

/// Done-flag decoding: canonical `1`/`0`, legacy exact `True`/`False`.
/// Anything else reads as not-done.
fn decode_done(field: &str) -> bool {
    matches!(field, DONE_TRUE | "True")
}
