//! Configuration for cscope-nav.
//!
//! Settings come from a JSON file, `.cscope-nav.json` in the working
//! directory unless another path is given, with built-in defaults for every
//! missing field. Command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cscope::query::DEFAULT_CHUNK_SIZE;
use crate::cscope::{CscopeExecutor, DEFAULT_DATABASE_FILE, DatabaseLocator};
use crate::nav::DEFAULT_STACK_CAPACITY;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".cscope-nav.json";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Program used to query the database.
    pub program: String,
    /// Database file name searched for in each directory.
    pub database_file: String,
    /// Directory to use instead of searching upward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_dir: Option<PathBuf>,
    /// Bytes read from the query process per read call.
    pub chunk_size: usize,
    /// Maximum number of navigation marks.
    pub stack_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: "cscope".to_string(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            database_dir: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from [`CONFIG_FILE`] in the
    /// working directory if it exists, or falls back to defaults.
    ///
    /// ## Errors
    /// Returns an error if an explicit `path` is missing, or if the file
    /// cannot be read or is not valid JSON.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(CONFIG_FILE).is_file() => Path::new(CONFIG_FILE),
            None => return Ok(Self::default()),
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {} - invalid JSON", path.display()))
    }

    /// Builds the query executor described by this configuration.
    pub fn executor(&self) -> CscopeExecutor {
        CscopeExecutor::builder()
            .program(&self.program)
            .database_file(&self.database_file)
            .chunk_size(self.chunk_size)
            .build()
    }

    /// Builds the database locator described by this configuration.
    pub fn locator(&self) -> DatabaseLocator {
        DatabaseLocator::new(&self.database_file)
    }
}

/// Writes a default [`CONFIG_FILE`] into `dir`.
///
/// ## Errors
/// Returns an error if:
/// - the file already exists
/// - File I/O fails
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let config_file = dir.join(CONFIG_FILE);
    if config_file.exists() {
        bail!(
            "{} already exists\n\n\
            To regenerate it, remove the existing file first.",
            config_file.display()
        );
    }

    // Write atomically (temp file + rename)
    let temp_file = config_file.with_extension("tmp");
    let json_str =
        serde_json::to_string_pretty(&Config::default()).context("failed to serialize JSON")?;

    fs::write(&temp_file, json_str).context("failed to write temporary config file")?;
    fs::rename(&temp_file, &config_file).context("failed to rename temporary config file")?;

    Ok(config_file)
}
