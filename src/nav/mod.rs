//! Editor-side navigation.
//!
//! This module turns cscope results into jumps inside the host editor and
//! remembers where each jump started so it can be undone.
//!
//! # Architecture
//!
//! The nav module is organized into:
//! - `controller`: query lifecycle and session context
//! - `stack`: bounded stack of navigation marks
//! - `host`: the trait the host editor implements
//! - `commands`: named commands and their parsing
//!
//! # Usage
//!
//! ```ignore
//! use cscope_nav::nav::{Command, Controller};
//!
//! let mut controller = Controller::new(executor, locator, 1024);
//! controller.run(&mut host, "find-callers do_work".parse()?).await.ok();
//! controller.run(&mut host, Command::PopMark).await.ok();
//! ```

pub mod commands;
pub mod controller;
pub mod host;
pub mod stack;

use crate::error::NavError;

/// Result type for navigation operations.
pub type NavResult<T> = std::result::Result<T, NavError>;

pub use commands::Command;
pub use controller::{Controller, NavContext, QueryOutcome};
pub use host::EditorHost;
pub use stack::{DEFAULT_STACK_CAPACITY, NavigationMark, NavigationStack};
