//! Named commands exposed to the host editor.
//!
//! Each command name maps onto one controller operation. The host binds
//! these names to keys or menu entries; the terminal session parses them
//! from input lines.
//!
//! # Available Commands
//!
//! - `find-symbol`, `find-global-definition`, `find-callees`,
//!   `find-callers`, `find-text`, `find-file`, `find-includers`,
//!   `find-assignments` run a query, optionally with an explicit symbol
//! - `select` jumps to an entry of the current result list
//! - `pop-navigation-mark` returns to the previously saved location
//! - `set-database-directory` overrides the database location

use std::fmt;
use std::str::FromStr;

use crate::cscope::OperationKind;

/// A parsed navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a query of the given kind.
    Find {
        /// Which query to run.
        kind: OperationKind,
        /// Explicit symbol; the word at the cursor is used when absent.
        symbol: Option<String>,
    },
    /// Jump to a 0-based entry of the current result list.
    Select(usize),
    /// Pop the navigation stack.
    PopMark,
    /// Replace the cached database directory.
    SetDatabaseDirectory(String),
}

/// Error returned when a command line cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

/// Maps a query command name to its operation kind.
pub fn kind_for_name(name: &str) -> Option<OperationKind> {
    let kind = match name {
        "find-symbol" => OperationKind::FindSymbol,
        "find-global-definition" => OperationKind::FindGlobalDefinition,
        "find-callees" => OperationKind::FindCallees,
        "find-callers" => OperationKind::FindCallers,
        "find-text" => OperationKind::FindText,
        "change-text" => OperationKind::ChangeText,
        "find-egrep-pattern" => OperationKind::FindEgrepPattern,
        "find-file" => OperationKind::FindFile,
        "find-includers" => OperationKind::FindIncluders,
        "find-assignments" => OperationKind::FindAssignments,
        _ => return None,
    };
    Some(kind)
}

/// The command name bound to a query kind.
pub fn name_for_kind(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::FindSymbol => "find-symbol",
        OperationKind::FindGlobalDefinition => "find-global-definition",
        OperationKind::FindCallees => "find-callees",
        OperationKind::FindCallers => "find-callers",
        OperationKind::FindText => "find-text",
        OperationKind::ChangeText => "change-text",
        OperationKind::FindEgrepPattern => "find-egrep-pattern",
        OperationKind::FindFile => "find-file",
        OperationKind::FindIncluders => "find-includers",
        OperationKind::FindAssignments => "find-assignments",
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Parses `<name> [argument]`; the argument is the rest of the line.
    ///
    /// `select` takes a 1-based position, as shown in the result list.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };
        let unknown = || UnknownCommand(line.to_string());

        if let Some(kind) = kind_for_name(name) {
            return Ok(Self::Find {
                kind,
                symbol: argument.map(str::to_string),
            });
        }

        match name {
            "pop-navigation-mark" => Ok(Self::PopMark),
            "set-database-directory" => argument
                .map(|dir| Self::SetDatabaseDirectory(dir.to_string()))
                .ok_or_else(unknown),
            "select" => argument
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .map(Self::Select)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}
