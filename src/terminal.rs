//! Line-oriented terminal front end.
//!
//! `TerminalHost` plays the role of the editor: its "buffer" is the file
//! most recently opened and its offset is the line the cursor was sent to.
//! The session loop reads one command per line and awaits each one before
//! reading the next, so a slow query blocks input just as it blocks the
//! editor.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::cscope::{QueryExecutor, SymbolRecord};
use crate::nav::commands::name_for_kind;
use crate::nav::{Command, Controller, EditorHost, NavigationMark};

/// Name of the buffer shown before the first jump.
pub const SCRATCH_BUFFER: &str = "*scratch*";

/// Terminal stand-in for the editor.
#[derive(Debug)]
pub struct TerminalHost<W> {
    out: W,
    buffer: String,
    offset: usize,
    word: Option<String>,
}

impl<W: Write> TerminalHost<W> {
    /// Creates a host writing to `out`, positioned in the scratch buffer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: SCRATCH_BUFFER.to_string(),
            offset: 0,
            word: None,
        }
    }

    /// Sets the word the cursor is considered to rest on.
    pub fn set_word(&mut self, word: impl Into<String>) {
        self.word = Some(word.into());
    }

    /// Current buffer name and offset.
    pub fn location(&self) -> (&str, usize) {
        (&self.buffer, self.offset)
    }

    /// Consumes the host and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> EditorHost for TerminalHost<W> {
    type Buffer = String;

    fn current_mark(&self) -> NavigationMark<String> {
        NavigationMark::new(self.buffer.clone(), self.offset)
    }

    fn word_at_cursor(&self) -> Option<String> {
        self.word.clone()
    }

    fn open_at_line(&mut self, path: &Path, line: u32) {
        self.buffer = path.display().to_string();
        self.offset = line as usize;
        let text = format!("-> {}:{}\n", self.buffer, self.offset);
        self.print(&text);
    }

    fn restore_mark(&mut self, mark: &NavigationMark<String>) {
        self.buffer.clone_from(&mark.buffer);
        self.offset = mark.offset;
        let text = format!("<- {}:{}\n", self.buffer, self.offset);
        self.print(&text);
    }

    fn present_choices(&mut self, records: &[SymbolRecord]) {
        let mut text = String::new();
        for (idx, record) in records.iter().enumerate() {
            let _ = writeln!(text, "{:>3}  {}", idx + 1, record.list_entry());
        }
        self.print(&text);
    }

    fn status(&mut self, message: &str) {
        let text = format!("[{message}]\n");
        self.print(&text);
    }
}

/// Usage text for the interactive session.
pub fn help_text() -> String {
    let mut text = String::from("commands:\n");
    for kind in crate::cscope::OperationKind::ALL {
        if kind.is_supported() {
            let _ = writeln!(text, "  {:<24} [symbol]  {}", name_for_kind(kind), kind);
        }
    }
    text.push_str("  select                   <n>       jump to entry n of the last list\n");
    text.push_str("  pop-navigation-mark                return to the previous location\n");
    text.push_str("  set-database-directory   <dir>     use the database in dir\n");
    text.push_str("  help | quit\n");
    text
}

/// Reads commands from `input` until end of input or `quit`.
///
/// ## Errors
/// Returns an error only if reading `input` fails.
pub async fn run_session<E, R, W>(
    controller: &mut Controller<E, String>,
    host: &mut TerminalHost<W>,
    input: R,
) -> std::io::Result<()>
where
    E: QueryExecutor,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    host.print("cscope> ");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" => break,
            "help" => host.print(&help_text()),
            _ => match line.parse::<Command>() {
                Ok(command) => {
                    match &command {
                        Command::Find {
                            symbol: Some(symbol),
                            ..
                        } => host.set_word(symbol.clone()),
                        Command::Find { kind, symbol: None } => {
                            let default = host.word_at_cursor();
                            let prompt = kind.prompt(default.as_deref());
                            host.print(&format!("{prompt}{}\n", default.unwrap_or_default()));
                        }
                        _ => {}
                    }
                    debug!(?command, "dispatching command");
                    let _ = controller.run(&mut *host, command).await;
                }
                Err(e) => host.status(&e.to_string()),
            },
        }
        host.print("cscope> ");
    }

    host.print("\n");
    Ok(())
}
