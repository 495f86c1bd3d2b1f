//! The editor-side collaborator.
//!
//! The controller never touches buffers, windows or the minibuffer
//! directly; it asks the host through this trait.

use std::fmt::Display;
use std::path::Path;

use crate::cscope::SymbolRecord;

use super::stack::NavigationMark;

/// Operations the host editor provides to the navigation controller.
pub trait EditorHost {
    /// Identity of a text buffer, stored in navigation marks.
    type Buffer: Clone + Display;

    /// The current buffer and cursor offset.
    fn current_mark(&self) -> NavigationMark<Self::Buffer>;

    /// The word under the cursor, if there is one.
    fn word_at_cursor(&self) -> Option<String>;

    /// Opens `path` and moves the cursor to the 1-based `line`.
    fn open_at_line(&mut self, path: &Path, line: u32);

    /// Switches to the mark's buffer and restores its offset.
    fn restore_mark(&mut self, mark: &NavigationMark<Self::Buffer>);

    /// Shows the result list for the user to pick from.
    fn present_choices(&mut self, records: &[SymbolRecord]);

    /// Shows a one-line status message.
    fn status(&mut self, message: &str);
}
