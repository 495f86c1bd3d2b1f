//! cscope integration.
//!
//! This module talks to the external `cscope` cross-reference tool: it finds
//! the database, runs line-oriented queries and parses their output.
//!
//! # Architecture
//!
//! The cscope module is organized into:
//! - `locator`: upward search for the `cscope.out` database
//! - `query`: process execution and output accumulation
//! - `parser`: line grammar for `cscope -L` output
//! - `types`: operation kinds, requests and parsed records
//!
//! # Usage
//!
//! ```ignore
//! use cscope_nav::cscope::{parse_all, CscopeExecutor, DatabaseLocator, QueryExecutor};
//!
//! let dir = DatabaseLocator::default().locate(&std::env::current_dir()?).unwrap();
//! let raw = CscopeExecutor::default().execute(&request).await?;
//! let records = parse_all(&raw);
//! ```

pub mod locator;
pub mod parser;
pub mod query;
pub mod types;

use crate::error::QueryError;

/// Result type for query execution.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

pub use locator::{DEFAULT_DATABASE_FILE, DatabaseLocator};
pub use parser::parse_all;
pub use query::{CscopeExecutor, CscopeExecutorConfig, QueryExecutor};
pub use types::{OperationKind, QueryRequest, SymbolRecord};
