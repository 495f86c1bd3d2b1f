//! Common test helpers and utilities.

#![allow(dead_code)]

pub mod temp_workspace;

use std::path::{Path, PathBuf};

use cscope_nav::cscope::{CscopeExecutor, SymbolRecord};
use cscope_nav::nav::{EditorHost, NavigationMark};

// Re-export for convenience
pub use temp_workspace::TestWorkspace;

/// A small C project used by most tests.
pub fn sample_project() -> String {
    r#"
//- /src/main.c
#include "util.h"

int main(void) {
    return add(1, 2);
}
//- /src/util.c
#include "util.h"

int add(int a, int b) {
    return a + b;
}
//- /src/util.h
int add(int a, int b);
"#
    .to_string()
}

/// Executor running the workspace's fake `cscope`.
pub fn fake_executor(ws: &TestWorkspace) -> CscopeExecutor {
    CscopeExecutor::builder().program(ws.program()).build()
}

/// Host that records every call made by the controller.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub buffer: String,
    pub offset: usize,
    pub word: Option<String>,
    pub jumps: Vec<(PathBuf, u32)>,
    pub choices: Vec<Vec<SymbolRecord>>,
    pub restored: Vec<NavigationMark<String>>,
    pub statuses: Vec<String>,
}

impl RecordingHost {
    /// A host positioned at `offset` in `buffer`.
    pub fn at(buffer: &str, offset: usize) -> Self {
        Self {
            buffer: buffer.to_string(),
            offset,
            ..Self::default()
        }
    }

    /// The last status message shown.
    pub fn last_status(&self) -> &str {
        self.statuses.last().map_or("", String::as_str)
    }
}

impl EditorHost for RecordingHost {
    type Buffer = String;

    fn current_mark(&self) -> NavigationMark<String> {
        NavigationMark::new(self.buffer.clone(), self.offset)
    }

    fn word_at_cursor(&self) -> Option<String> {
        self.word.clone()
    }

    fn open_at_line(&mut self, path: &Path, line: u32) {
        self.jumps.push((path.to_path_buf(), line));
        self.buffer = path.display().to_string();
        self.offset = line as usize;
    }

    fn restore_mark(&mut self, mark: &NavigationMark<String>) {
        self.restored.push(mark.clone());
        self.buffer.clone_from(&mark.buffer);
        self.offset = mark.offset;
    }

    fn present_choices(&mut self, records: &[SymbolRecord]) {
        self.choices.push(records.to_vec());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}
