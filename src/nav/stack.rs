//! Bounded LIFO of navigation marks.

use crate::error::StackError;

/// Default number of marks the stack holds.
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

/// A saved editor location.
///
/// `buffer` only identifies the host's buffer; the stack never owns or
/// touches the buffer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMark<B> {
    /// Identity of the host buffer.
    pub buffer: B,
    /// Position within that buffer.
    pub offset: usize,
}

impl<B> NavigationMark<B> {
    /// Creates a new mark.
    pub fn new(buffer: B, offset: usize) -> Self {
        Self { buffer, offset }
    }
}

/// Fixed-capacity stack of marks.
///
/// A push onto a full stack is rejected rather than evicting the oldest
/// mark; existing entries are never reordered.
#[derive(Debug, Clone)]
pub struct NavigationStack<B> {
    marks: Vec<NavigationMark<B>>,
    capacity: usize,
}

impl<B> Default for NavigationStack<B> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }
}

impl<B> NavigationStack<B> {
    /// Creates an empty stack holding at most `capacity` marks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            marks: Vec::with_capacity(capacity.min(DEFAULT_STACK_CAPACITY)),
            capacity,
        }
    }

    /// Pushes `mark` on top.
    ///
    /// ## Errors
    /// `StackError::Overflow` if the stack is full; the mark is dropped.
    pub fn push(&mut self, mark: NavigationMark<B>) -> Result<(), StackError> {
        if self.marks.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.marks.push(mark);
        Ok(())
    }

    /// Removes and returns the top mark.
    ///
    /// ## Errors
    /// `StackError::Underflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<NavigationMark<B>, StackError> {
        self.marks.pop().ok_or(StackError::Underflow)
    }

    /// The top mark, if any.
    pub fn peek(&self) -> Option<&NavigationMark<B>> {
        self.marks.last()
    }

    /// Number of marks on the stack.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Maximum number of marks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Marks from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationMark<B>> {
        self.marks.iter()
    }
}
