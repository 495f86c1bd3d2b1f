//! Error types for cscope-nav.
//!
//! This module defines all error types used throughout the crate,
//! organized by subsystem: query execution, the navigation stack,
//! database directory validation and the navigation controller.
//!
//! The `Display` text of every variant doubles as the status message shown
//! to the user, so messages are short and lowercase.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while running the cross-reference query process.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query program could not be started.
    #[error("failed to start '{program}': {source}")]
    SpawnFailed {
        /// The program that was being spawned.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the query output failed; the partial output was discarded.
    #[error("failed to read query output: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// The query process exited unsuccessfully without printing results.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        /// The program that was run.
        program: String,
        /// Its exit status.
        status: std::process::ExitStatus,
        /// What it wrote to standard error, trimmed.
        stderr: String,
    },

    /// The query process produced no output at all.
    #[error("query produced no output")]
    NoOutput,
}

/// Errors raised by the navigation mark stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    /// The stack is at capacity; the mark was not recorded.
    #[error("navigation history full ({capacity} marks)")]
    Overflow {
        /// The capacity of the stack.
        capacity: usize,
    },

    /// There is nothing to pop.
    #[error("navigation history empty")]
    Underflow,
}

/// Reasons a user-supplied database directory is rejected.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The path is not absolute (after `~` expansion).
    #[error("please provide an absolute path")]
    NotAbsolute,

    /// Nothing exists at the path.
    #[error("symbol directory doesn't exist: {}", .0.display())]
    DoesNotExist(PathBuf),

    /// The path could not be inspected.
    #[error("unknown error checking symbol directory {}: {source}", path.display())]
    Unreadable {
        /// The path being inspected.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a directory.
    #[error("symbol path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The directory does not contain the database file.
    #[error("no symbol file in {} directory", .0.display())]
    NoDatabase(PathBuf),
}

/// Errors surfaced by the navigation controller.
///
/// Every variant is recoverable: the controller reports it as a single
/// status message and leaves its state untouched.
#[derive(Debug, Error)]
pub enum NavError {
    /// No database directory is cached and the upward search found none.
    #[error("no symbol database located; set one with set-database-directory")]
    DatabaseNotFound,

    /// Neither an explicit symbol nor a word at the cursor was available.
    #[error("empty symbol")]
    EmptySymbol,

    /// The operation kind is recognised but deliberately not supported.
    #[error("{0} not supported")]
    UnsupportedOperation(&'static str),

    /// The query ran but matched nothing.
    #[error("no matches")]
    NoMatches,

    /// A selection was made outside the current result list.
    #[error("no result at position {index} ({len} results)")]
    SelectionOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of results available.
        len: usize,
    },

    /// Running the query failed.
    #[error("cscope query failed: {0}")]
    Query(#[from] QueryError),

    /// A navigation stack operation failed.
    #[error(transparent)]
    Stack(#[from] StackError),

    /// A database directory was rejected.
    #[error(transparent)]
    InvalidDirectory(#[from] DirectoryError),
}

/// A unified error type for the entire crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Navigation error.
    #[error(transparent)]
    Nav(#[from] NavError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for cscope-nav operations.
pub type Result<T> = std::result::Result<T, Error>;
