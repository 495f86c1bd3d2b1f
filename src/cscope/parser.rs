//! Parser for `cscope -L` line output.
//!
//! Each line has the shape `<file> <scope> <line> <context>\n`. The first
//! three fields end at a single space; the context runs to the end of the
//! line and may itself contain spaces. Every field has a fixed capacity:
//! bytes past it are skipped while the scan keeps moving forward, so an
//! oversized token never spills into its neighbours.

use arrayvec::ArrayVec;
use tracing::debug;

use super::types::SymbolRecord;

/// Maximum stored bytes of the file field.
pub const FILE_CAPACITY: usize = 1023;
/// Maximum stored bytes of the scope field.
pub const SCOPE_CAPACITY: usize = 255;
/// Maximum stored digits of the line field.
pub const LINE_DIGITS: usize = 7;
/// Maximum stored bytes of the context field.
pub const CONTEXT_CAPACITY: usize = 1023;

const FIELD_SEPARATOR: u8 = b' ';
const LINE_TERMINATOR: u8 = b'\n';

/// A fixed-capacity field that drops bytes once full.
#[derive(Debug, Default)]
struct Field<const CAP: usize> {
    bytes: ArrayVec<u8, CAP>,
    dropped: usize,
}

impl<const CAP: usize> Field<CAP> {
    fn push(&mut self, byte: u8) {
        if self.bytes.try_push(byte).is_err() {
            self.dropped += 1;
        }
    }

    fn into_string(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Forward-only cursor over the raw query output.
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Reads a space-terminated field and consumes the separator.
    ///
    /// Returns `None`, leaving the cursor on the terminator, if the line or
    /// the input ends before a separator is seen.
    fn separated_field<const CAP: usize>(&mut self) -> Option<Field<CAP>> {
        let mut field = Field::default();
        loop {
            match self.peek() {
                Some(FIELD_SEPARATOR) => {
                    self.pos += 1;
                    return Some(field);
                }
                Some(LINE_TERMINATOR) | None => return None,
                Some(byte) => {
                    field.push(byte);
                    self.pos += 1;
                }
            }
        }
    }

    /// Reads everything up to the line terminator or the end of input.
    fn rest_of_line<const CAP: usize>(&mut self) -> Field<CAP> {
        let mut field = Field::default();
        while let Some(byte) = self.peek() {
            if byte == LINE_TERMINATOR {
                break;
            }
            field.push(byte);
            self.pos += 1;
        }
        field
    }

    /// Moves past the current line terminator, if any.
    fn skip_line(&mut self) {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == LINE_TERMINATOR {
                break;
            }
        }
    }

    fn record(&mut self) -> Option<SymbolRecord> {
        let file = self.separated_field::<FILE_CAPACITY>()?;
        let scope = self.separated_field::<SCOPE_CAPACITY>()?;
        let line = self.separated_field::<LINE_DIGITS>()?;
        let context = self.rest_of_line::<CONTEXT_CAPACITY>();

        if file.dropped + scope.dropped + context.dropped > 0 {
            debug!(
                file_dropped = file.dropped,
                scope_dropped = scope.dropped,
                context_dropped = context.dropped,
                "truncated oversized cscope fields"
            );
        }

        Some(SymbolRecord {
            file: file.into_string(),
            scope: scope.into_string(),
            line: parse_line_number(&line.bytes).max(1),
            context: context.into_string(),
        })
    }
}

/// Leniently parses a decimal line number.
///
/// Leading whitespace and a `+` sign are accepted; parsing stops at the first
/// non-digit and an empty prefix yields `0`. Records clamp that `0` to the
/// first line.
pub fn parse_line_number(digits: &[u8]) -> u32 {
    let mut rest = digits;
    while let [first, tail @ ..] = rest {
        if first.is_ascii_whitespace() {
            rest = tail;
        } else {
            break;
        }
    }
    if let [b'+', tail @ ..] = rest {
        rest = tail;
    }

    rest.iter()
        .take_while(|byte| byte.is_ascii_digit())
        .fold(0u32, |acc, byte| {
            acc.saturating_mul(10).saturating_add(u32::from(byte - b'0'))
        })
}

/// Parses the complete output of one query into records, in input order.
///
/// Empty lines and lines that end before the third separator are skipped.
pub fn parse_all(output: &[u8]) -> Vec<SymbolRecord> {
    let mut scanner = Scanner::new(output);
    let mut records = Vec::new();

    while !scanner.is_done() {
        if scanner.peek() == Some(LINE_TERMINATOR) {
            scanner.skip_line();
            continue;
        }
        let start = scanner.pos;
        match scanner.record() {
            Some(record) => records.push(record),
            None => debug!(offset = start, "skipping malformed cscope line"),
        }
        scanner.skip_line();
    }

    records
}
