//! Query execution.
//!
//! This module spawns `cscope` in line-oriented mode with an explicit
//! argument vector, drains its standard output in fixed-size chunks and
//! hands the accumulated bytes back to the caller.
//!
//! # Example
//!
//! ```ignore
//! use cscope_nav::cscope::{CscopeExecutor, QueryExecutor, QueryRequest, OperationKind};
//!
//! let executor = CscopeExecutor::builder().program("cscope").build();
//! let output = executor
//!     .execute(&QueryRequest {
//!         kind: OperationKind::FindGlobalDefinition,
//!         symbol: "main".to_string(),
//!         database_dir: "/src/project".into(),
//!     })
//!     .await?;
//! ```

use std::ffi::OsString;
use std::process::Stdio;

use futures::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::error::QueryError;

use super::QueryResult;
use super::locator::DEFAULT_DATABASE_FILE;
use super::types::QueryRequest;

/// Default read chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Runs a query and returns the raw output of the query tool.
///
/// The controller is generic over this trait so the process can be
/// replaced in tests.
#[allow(async_fn_in_trait)]
pub trait QueryExecutor {
    /// Executes `request` to completion.
    ///
    /// ## Errors
    /// `QueryError::SpawnFailed`, `QueryError::ReadFailed`,
    /// `QueryError::Failed` when the tool exited unsuccessfully without
    /// output, or `QueryError::NoOutput` when it printed nothing.
    async fn execute(&self, request: &QueryRequest) -> QueryResult<Vec<u8>>;
}

/// Configuration for the `cscope` executor.
#[derive(Debug, Clone)]
pub struct CscopeExecutorConfig {
    /// Program to run.
    pub program: String,
    /// Database file name inside the database directory.
    pub database_file: String,
    /// Size of each read from the child's stdout.
    pub chunk_size: usize,
}

impl Default for CscopeExecutorConfig {
    fn default() -> Self {
        Self {
            program: "cscope".to_string(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Builder for [`CscopeExecutor`].
#[derive(Debug, Default)]
pub struct CscopeExecutorBuilder {
    config: CscopeExecutorConfig,
}

impl CscopeExecutorBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the program to run.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.config.program = program.into();
        self
    }

    /// Sets the database file name.
    #[must_use]
    pub fn database_file(mut self, name: impl Into<String>) -> Self {
        self.config.database_file = name.into();
        self
    }

    /// Sets the read chunk size. Zero is bumped to one byte.
    #[must_use]
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size.max(1);
        self
    }

    /// Builds the executor.
    pub fn build(self) -> CscopeExecutor {
        CscopeExecutor {
            config: self.config,
        }
    }
}

/// Executes queries by spawning `cscope -L`.
#[derive(Debug, Clone, Default)]
pub struct CscopeExecutor {
    config: CscopeExecutorConfig,
}

impl CscopeExecutor {
    /// Creates a new builder.
    pub fn builder() -> CscopeExecutorBuilder {
        CscopeExecutorBuilder::new()
    }

    /// Returns the executor configuration.
    pub fn config(&self) -> &CscopeExecutorConfig {
        &self.config
    }

    /// Builds the argument vector for `request`, excluding the program.
    ///
    /// The symbol is passed as its own argument and never goes through a
    /// shell.
    pub fn arguments(&self, request: &QueryRequest) -> Vec<OsString> {
        vec![
            OsString::from("-p8"),
            OsString::from("-d"),
            OsString::from("-f"),
            request
                .database_dir
                .join(&self.config.database_file)
                .into_os_string(),
            OsString::from(format!("-L{}", request.kind.code())),
            OsString::from(&request.symbol),
        ]
    }
}

impl QueryExecutor for CscopeExecutor {
    async fn execute(&self, request: &QueryRequest) -> QueryResult<Vec<u8>> {
        let args = self.arguments(request);
        debug!(program = %self.config.program, ?args, "spawning cscope query");

        let mut child = async_process::Command::new(&self.config.program)
            .args(&args)
            .current_dir(&request.database_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| QueryError::SpawnFailed {
                program: self.config.program.clone(),
                source,
            })?;

        let Some(mut stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.status().await;
            return Err(QueryError::SpawnFailed {
                program: self.config.program.clone(),
                source: std::io::Error::other("stdout was not captured"),
            });
        };
        let mut stderr = child.stderr.take();

        // Drain both pipes together; a full stderr pipe blocks the child
        let mut diagnostics = Vec::new();
        let (output, ()) = futures::join!(
            read_chunked(&mut stdout, self.config.chunk_size),
            async {
                if let Some(stderr) = stderr.as_mut() {
                    if let Err(e) = stderr.read_to_end(&mut diagnostics).await {
                        debug!(error = %e, "failed to read cscope stderr");
                    }
                }
            }
        );
        drop(stdout);
        drop(stderr);

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let _ = child.kill();
                let _ = child.status().await;
                return Err(QueryError::ReadFailed(e));
            }
        };
        let diagnostics = String::from_utf8_lossy(&diagnostics).trim().to_string();

        match child.status().await {
            Ok(status) if !status.success() => {
                warn!(%status, stderr = %diagnostics, "cscope exited unsuccessfully");
                if output.is_empty() {
                    return Err(QueryError::Failed {
                        program: self.config.program.clone(),
                        status,
                        stderr: diagnostics,
                    });
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to wait for cscope"),
        }

        debug!(bytes = output.len(), "cscope query finished");

        if output.is_empty() {
            return Err(QueryError::NoOutput);
        }
        Ok(output)
    }
}

/// Drains `reader` into a buffer grown one chunk at a time.
///
/// On error the partially filled buffer is dropped before returning.
///
/// ## Errors
/// Any non-interrupt I/O error from `reader`.
pub async fn read_chunked<R>(reader: &mut R, chunk_size: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let chunk_size = chunk_size.max(1);
    let mut buffer = vec![0u8; chunk_size];
    let mut filled = 0;

    loop {
        if filled == buffer.len() {
            buffer.resize(buffer.len() + chunk_size, 0);
        }
        let end = (filled + chunk_size).min(buffer.len());
        match reader.read(&mut buffer[filled..end]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    buffer.truncate(filled);
    Ok(buffer)
}
