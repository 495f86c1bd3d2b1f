//! Upward search for the cross-reference database.
//!
//! Starting from a directory, each ancestor is probed in turn for the
//! database file until one is found or the filesystem root has been checked.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Default name of the cscope database file.
pub const DEFAULT_DATABASE_FILE: &str = "cscope.out";

/// Finds the directory that holds the database file.
#[derive(Debug, Clone)]
pub struct DatabaseLocator {
    file_name: String,
}

impl Default for DatabaseLocator {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_FILE)
    }
}

impl DatabaseLocator {
    /// Creates a locator probing for `file_name` in each candidate directory.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Name of the database file this locator looks for.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path of the database file inside `dir`.
    pub fn database_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    /// Whether `dir` directly contains the database as a regular file.
    pub fn contains_database(&self, dir: &Path) -> bool {
        std::fs::metadata(self.database_path(dir)).is_ok_and(|meta| meta.is_file())
    }

    /// Searches `start` and its ancestors for the database.
    ///
    /// Returns the first directory containing the database file, or `None`
    /// once the root has been checked without a match.
    pub fn locate(&self, start: &Path) -> Option<PathBuf> {
        let start = std::path::absolute(start).ok()?;
        let mut candidate = start.as_path();

        loop {
            if self.contains_database(candidate) {
                debug!(dir = %candidate.display(), "located symbol database");
                return Some(candidate.to_path_buf());
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => {
                    debug!(start = %start.display(), "reached filesystem root without a symbol database");
                    return None;
                }
            }
        }
    }
}
