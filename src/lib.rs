//! cscope-nav
//!
//! Symbol cross-reference navigation for text editors, backed by a
//! precomputed `cscope` database.
//!
//! # Overview
//!
//! This library provides:
//! - Upward search for the `cscope.out` database
//! - Query execution through the `cscope` line-oriented interface
//! - A parser for `cscope -L` output
//! - A bounded stack of navigation marks for jump-and-return
//! - A controller that ties these together behind an editor host trait
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐   commands    ┌─────────────────┐
//! │   Host Editor   │──────────────►│   Controller    │
//! │ (EditorHost)    │◄──────────────│  (nav context)  │
//! └─────────────────┘  jumps/status └──┬─────────┬────┘
//!                                      │         │
//!                               ┌──────▼───┐ ┌───▼────────────┐
//!                               │ Locator  │ │ NavigationStack│
//!                               └──────────┘ └────────────────┘
//!                               ┌──────────┐ ┌──────────┐
//!                               │ Executor │►│  Parser  │
//!                               └────┬─────┘ └──────────┘
//!                                    │ argv, stdout
//!                               ┌────▼─────┐
//!                               │  cscope  │
//!                               └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types for the entire crate
//! - [`cscope`] - Database location, query execution and output parsing
//! - [`nav`] - Navigation controller, mark stack and host interface
//! - [`config`] - Configuration file handling
//! - [`terminal`] - Line-oriented terminal host and session loop
//!
//! # Example
//!
//! ```ignore
//! use cscope_nav::{config::Config, nav::Controller};
//!
//! let config = Config::load(None)?;
//! let mut controller: Controller<_, String> =
//!     Controller::new(config.executor(), config.locator(), config.stack_capacity);
//! controller.run(&mut host, "find-global-definition main".parse()?).await.ok();
//! ```

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod cscope;
pub mod error;
pub mod nav;
pub mod terminal;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
