//! Core data types for cscope queries.
//!
//! This module provides the operation kinds understood by `cscope -L`,
//! the per-call query request and the parsed symbol record.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The category of cross-reference query.
///
/// Each kind maps onto the numeric field code passed to `cscope -L<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// `0`: find this C symbol.
    FindSymbol,
    /// `1`: find this global definition.
    FindGlobalDefinition,
    /// `2`: find functions called by this function.
    FindCallees,
    /// `3`: find functions calling this function.
    FindCallers,
    /// `4`: find this text string.
    FindText,
    /// `5`: change this text string. Not supported.
    ChangeText,
    /// `6`: find this egrep pattern. Not supported.
    FindEgrepPattern,
    /// `7`: find this file.
    FindFile,
    /// `8`: find files #including this file.
    FindIncluders,
    /// `9`: find assignments to this symbol.
    FindAssignments,
}

impl OperationKind {
    /// All kinds, in field-code order.
    pub const ALL: [Self; 10] = [
        Self::FindSymbol,
        Self::FindGlobalDefinition,
        Self::FindCallees,
        Self::FindCallers,
        Self::FindText,
        Self::ChangeText,
        Self::FindEgrepPattern,
        Self::FindFile,
        Self::FindIncluders,
        Self::FindAssignments,
    ];

    /// Returns the `cscope` field code for this kind.
    pub fn code(self) -> u8 {
        match self {
            Self::FindSymbol => 0,
            Self::FindGlobalDefinition => 1,
            Self::FindCallees => 2,
            Self::FindCallers => 3,
            Self::FindText => 4,
            Self::ChangeText => 5,
            Self::FindEgrepPattern => 6,
            Self::FindFile => 7,
            Self::FindIncluders => 8,
            Self::FindAssignments => 9,
        }
    }

    /// Looks up a kind by its `cscope` field code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Whether queries of this kind may be executed.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::ChangeText | Self::FindEgrepPattern)
    }

    /// Human-readable description, used in prompts and status messages.
    pub fn description(self) -> &'static str {
        match self {
            Self::FindSymbol => "Find symbol",
            Self::FindGlobalDefinition => "Find global definition",
            Self::FindCallees => "Find functions called by this function",
            Self::FindCallers => "Find functions calling this function",
            Self::FindText => "Find text string",
            Self::ChangeText => "Change text string",
            Self::FindEgrepPattern => "Find egrep pattern",
            Self::FindFile => "Find file",
            Self::FindIncluders => "Find #including file",
            Self::FindAssignments => "Find assignments to symbol",
        }
    }

    /// Builds the minibuffer prompt, mentioning the default symbol if any.
    pub fn prompt(self, default: Option<&str>) -> String {
        match default {
            Some(word) if !word.is_empty() => {
                format!("{} [default {word}]: ", self.description())
            }
            _ => format!("{}: ", self.description()),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A single query against the cross-reference database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// What to look for.
    pub kind: OperationKind,
    /// The symbol, file name or text to query. Never empty.
    pub symbol: String,
    /// Absolute directory holding the database file.
    pub database_dir: PathBuf,
}

/// One match emitted by the query tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Path of the matching file, relative to the database directory.
    pub file: String,
    /// Enclosing function or scope.
    pub scope: String,
    /// 1-based line number.
    pub line: u32,
    /// Preview text of the matching line.
    pub context: String,
}

impl SymbolRecord {
    /// Formats the record as a row of the result list.
    pub fn list_entry(&self) -> String {
        format!(
            "{:<32} [{}] {:<24} {}",
            self.file, self.line, self.scope, self.context
        )
    }
}
