//! Navigation controller.
//!
//! This module contains the `Controller` that drives one query from
//! database resolution to the final jump, and the session context it owns:
//! the cached database directory, the result list awaiting a selection and
//! the navigation stack.
//!
//! A query moves through
//! `Idle → ResolvingDatabase → AwaitingSymbol → Querying → Parsing →
//! {DirectJump | PresentingChoices} → Idle`. Any failure returns to `Idle`
//! without touching the stack.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cscope::{
    DatabaseLocator, OperationKind, QueryExecutor, QueryRequest, SymbolRecord, parse_all,
};
use crate::error::{DirectoryError, NavError, QueryError};

use super::NavResult;
use super::commands::Command;
use super::host::EditorHost;
use super::stack::{NavigationMark, NavigationStack};

/// Result list waiting for the user to pick an entry.
#[derive(Debug, Clone)]
struct PendingChoices {
    database_dir: PathBuf,
    records: Vec<SymbolRecord>,
}

/// Per-session navigation state.
#[derive(Debug)]
pub struct NavContext<B> {
    database_dir: Option<PathBuf>,
    pending: Option<PendingChoices>,
    stack: NavigationStack<B>,
}

impl<B> NavContext<B> {
    /// Creates an empty context whose stack holds `stack_capacity` marks.
    pub fn new(stack_capacity: usize) -> Self {
        Self {
            database_dir: None,
            pending: None,
            stack: NavigationStack::with_capacity(stack_capacity),
        }
    }
}

/// How a successful query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Exactly one match; the host was sent straight to it.
    Jumped(SymbolRecord),
    /// Several matches were presented; the count is attached.
    Choices(usize),
}

/// Orchestrates locator, executor, parser and navigation stack.
#[derive(Debug)]
pub struct Controller<E, B> {
    executor: E,
    locator: DatabaseLocator,
    context: NavContext<B>,
}

impl<E, B> Controller<E, B>
where
    E: QueryExecutor,
    B: Clone + std::fmt::Display,
{
    /// Creates a controller with a fresh session context.
    pub fn new(executor: E, locator: DatabaseLocator, stack_capacity: usize) -> Self {
        Self {
            executor,
            locator,
            context: NavContext::new(stack_capacity),
        }
    }

    /// Seeds the database directory from configuration.
    ///
    /// The directory goes through the same checks as
    /// [`Controller::set_database_directory`], so a relative or empty
    /// directory never reaches a query.
    ///
    /// ## Errors
    /// `InvalidDirectory` describing the first failed check.
    pub fn with_database_dir(mut self, dir: impl AsRef<Path>) -> NavResult<Self> {
        let dir = validate_database_dir(&self.locator, &dir.as_ref().to_string_lossy())?;
        debug!(dir = %dir.display(), "symbol database directory seeded");
        self.context.database_dir = Some(dir);
        Ok(self)
    }

    /// The cached database directory, if resolved.
    pub fn database_dir(&self) -> Option<&Path> {
        self.context.database_dir.as_deref()
    }

    /// The result list currently awaiting a selection.
    pub fn pending_results(&self) -> &[SymbolRecord] {
        self.context
            .pending
            .as_ref()
            .map_or(&[], |pending| pending.records.as_slice())
    }

    /// The navigation stack.
    pub fn stack(&self) -> &NavigationStack<B> {
        &self.context.stack
    }

    /// Runs a named command, reporting any failure as a status message.
    ///
    /// ## Errors
    /// Returns the error after it has been reported, for callers that want
    /// to inspect it. No error leaves the session in a partial state.
    pub async fn run<H>(&mut self, host: &mut H, command: Command) -> NavResult<()>
    where
        H: EditorHost<Buffer = B>,
    {
        let result = match command {
            Command::Find { kind, symbol } => {
                self.find(host, kind, symbol.as_deref()).await.map(drop)
            }
            Command::Select(index) => self.select(host, index).map(drop),
            Command::PopMark => self.pop_mark(host).map(drop),
            Command::SetDatabaseDirectory(dir) => {
                self.set_database_directory(host, &dir).map(drop)
            }
        };

        if let Err(e) = &result {
            debug!(error = %e, "navigation command failed");
            host.status(&e.to_string());
        }
        result
    }

    /// Runs one query of `kind` and navigates according to the match count.
    ///
    /// `symbol` overrides the word at the cursor when it is not blank.
    ///
    /// ## Errors
    /// `UnsupportedOperation`, `DatabaseNotFound`, `EmptySymbol`, `Query`
    /// or `NoMatches`.
    pub async fn find<H>(
        &mut self,
        host: &mut H,
        kind: OperationKind,
        symbol: Option<&str>,
    ) -> NavResult<QueryOutcome>
    where
        H: EditorHost<Buffer = B>,
    {
        if !kind.is_supported() {
            return Err(NavError::UnsupportedOperation(kind.description()));
        }

        let database_dir = self.resolve_database(host)?;

        let symbol = symbol
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| host.word_at_cursor().filter(|w| !w.trim().is_empty()))
            .ok_or(NavError::EmptySymbol)?;

        let request = QueryRequest {
            kind,
            symbol,
            database_dir,
        };
        info!(kind = %kind, symbol = %request.symbol, "running cscope query");

        self.context.pending = None;
        let raw = match self.executor.execute(&request).await {
            Ok(raw) => raw,
            Err(QueryError::NoOutput) => return Err(NavError::NoMatches),
            Err(e) => return Err(e.into()),
        };

        let mut records = parse_all(&raw);
        debug!(count = records.len(), "parsed cscope output");

        match records.len() {
            0 => Err(NavError::NoMatches),
            1 => {
                let record = records.remove(0);
                self.jump(host, &request.database_dir, &record);
                Ok(QueryOutcome::Jumped(record))
            }
            count => {
                host.present_choices(&records);
                self.context.pending = Some(PendingChoices {
                    database_dir: request.database_dir,
                    records,
                });
                Ok(QueryOutcome::Choices(count))
            }
        }
    }

    /// Jumps to entry `index` (0-based) of the current result list.
    ///
    /// The list stays available, so another entry may be picked later.
    ///
    /// ## Errors
    /// `SelectionOutOfRange` when `index` is not in the list.
    pub fn select<H>(&mut self, host: &mut H, index: usize) -> NavResult<SymbolRecord>
    where
        H: EditorHost<Buffer = B>,
    {
        let (database_dir, record) = {
            let pending = self.context.pending.as_ref();
            let len = pending.map_or(0, |p| p.records.len());
            let pending = pending
                .filter(|p| index < p.records.len())
                .ok_or(NavError::SelectionOutOfRange { index, len })?;
            (pending.database_dir.clone(), pending.records[index].clone())
        };

        self.jump(host, &database_dir, &record);
        Ok(record)
    }

    /// Returns to the most recently saved location.
    ///
    /// ## Errors
    /// `Stack(Underflow)` when there is no saved location.
    pub fn pop_mark<H>(&mut self, host: &mut H) -> NavResult<NavigationMark<B>>
    where
        H: EditorHost<Buffer = B>,
    {
        let mark = self.context.stack.pop()?;
        host.status(&format!("popped offset {} in {}", mark.offset, mark.buffer));
        host.restore_mark(&mark);
        Ok(mark)
    }

    /// Validates and caches a user-supplied database directory.
    ///
    /// A leading `~` is expanded to the home directory, and `~name` reads
    /// as `~/name`. On failure the previously cached directory is kept.
    ///
    /// ## Errors
    /// `InvalidDirectory` describing the first failed check.
    pub fn set_database_directory<H>(&mut self, host: &mut H, input: &str) -> NavResult<PathBuf>
    where
        H: EditorHost<Buffer = B>,
    {
        let dir = validate_database_dir(&self.locator, input)?;
        info!(dir = %dir.display(), "symbol database directory set");
        host.status(&format!("symbol database at: {}", dir.display()));
        self.context.database_dir = Some(dir.clone());
        Ok(dir)
    }

    /// Returns the cached database directory, locating it on first use.
    fn resolve_database<H>(&mut self, host: &mut H) -> NavResult<PathBuf>
    where
        H: EditorHost<Buffer = B>,
    {
        if let Some(dir) = &self.context.database_dir {
            return Ok(dir.clone());
        }

        let cwd = std::env::current_dir().map_err(|e| {
            warn!(error = %e, "cannot read the working directory");
            NavError::DatabaseNotFound
        })?;
        let dir = self
            .locator
            .locate(&cwd)
            .ok_or(NavError::DatabaseNotFound)?;

        host.status(&format!("symbol database at: {}", dir.display()));
        self.context.database_dir = Some(dir.clone());
        Ok(dir)
    }

    /// Saves the current location and opens `record`.
    ///
    /// A full stack is reported but does not prevent the jump.
    fn jump<H>(&mut self, host: &mut H, database_dir: &Path, record: &SymbolRecord)
    where
        H: EditorHost<Buffer = B>,
    {
        let mark = host.current_mark();
        let saved = format!("saved offset {} in {}", mark.offset, mark.buffer);
        match self.context.stack.push(mark) {
            Ok(()) => host.status(&saved),
            Err(e) => {
                warn!(error = %e, "navigation mark not recorded");
                host.status(&e.to_string());
            }
        }

        host.open_at_line(&database_dir.join(&record.file), record.line);
    }
}

/// Checks that `input` names an absolute directory holding the database.
fn validate_database_dir(
    locator: &DatabaseLocator,
    input: &str,
) -> Result<PathBuf, DirectoryError> {
    let dir = PathBuf::from(expand_home(input.trim()).as_ref());

    if !dir.is_absolute() {
        return Err(DirectoryError::NotAbsolute);
    }

    match std::fs::metadata(&dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(DirectoryError::NotADirectory(dir)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DirectoryError::DoesNotExist(dir));
        }
        Err(source) => return Err(DirectoryError::Unreadable { path: dir, source }),
    }

    if !locator.contains_database(&dir) {
        return Err(DirectoryError::NoDatabase(dir));
    }
    Ok(dir)
}

/// Expands a leading `~`, treating `~name` as a path under the home
/// directory rather than another user's home.
fn expand_home(input: &str) -> Cow<'_, str> {
    match input.strip_prefix('~') {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {
            Cow::Owned(shellexpand::tilde(&format!("~/{rest}")).into_owned())
        }
        _ => shellexpand::tilde(input),
    }
}
