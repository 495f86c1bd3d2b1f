//! cscope-nav - Entry Point
//!
//! Sets up logging, loads configuration, parses arguments and runs either
//! an interactive navigation session or a one-shot query.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cscope_nav::config::{self, Config};
use cscope_nav::cscope::{CscopeExecutor, SymbolRecord};
use cscope_nav::error::NavError;
use cscope_nav::nav::commands::kind_for_name;
use cscope_nav::nav::{Controller, EditorHost, NavigationMark, QueryOutcome};
use cscope_nav::terminal::{TerminalHost, run_session};

/// cscope cross-reference navigation.
#[derive(Parser, Debug)]
#[command(name = "cscope-nav")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to .cscope-nav.json if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the database, skipping the upward search.
    #[arg(short, long)]
    database_dir: Option<PathBuf>,

    /// Query program to run.
    #[arg(long)]
    program: Option<String>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interactive session reading commands from stdin (default).
    Session,
    /// Run one query and print its records.
    Query {
        /// Command name, e.g. find-global-definition.
        command: String,
        /// Symbol, file name or text to look up.
        symbol: String,
        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write a default .cscope-nav.json into the current directory.
    InitConfig,
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }

    /// Loads the config file and applies command-line overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(dir) = &self.database_dir {
            config.database_dir = Some(dir.clone());
        }
        if let Some(program) = &self.program {
            config.program.clone_from(program);
        }
        Ok(config)
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cscope_nav={level}")));

    // Logs go to stderr; stdout carries results and the session
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

/// Builds the controller, validating any configured database directory.
fn controller(config: &Config) -> Result<Controller<CscopeExecutor, String>> {
    let controller = Controller::new(
        config.executor(),
        config.locator(),
        config.stack_capacity,
    );
    match &config.database_dir {
        Some(dir) => controller
            .with_database_dir(dir)
            .with_context(|| format!("invalid database directory {}", dir.display())),
        None => Ok(controller),
    }
}

async fn session(config: &Config) -> Result<()> {
    let mut controller = controller(config)?;

    let mut host = TerminalHost::new(std::io::stdout());
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(&mut controller, &mut host, stdin)
        .await
        .context("failed to read commands")
}

/// Host for one-shot queries: nothing is opened and status goes to the log.
struct BatchHost;

impl EditorHost for BatchHost {
    type Buffer = String;

    fn current_mark(&self) -> NavigationMark<String> {
        NavigationMark::new(String::from("<query>"), 0)
    }

    fn word_at_cursor(&self) -> Option<String> {
        None
    }

    fn open_at_line(&mut self, path: &Path, line: u32) {
        debug!(path = %path.display(), line, "single match");
    }

    fn restore_mark(&mut self, _mark: &NavigationMark<String>) {}

    fn present_choices(&mut self, records: &[SymbolRecord]) {
        debug!(count = records.len(), "multiple matches");
    }

    fn status(&mut self, message: &str) {
        info!("{message}");
    }
}

/// Runs one query and returns its records; no matches is an empty list.
async fn query_records(
    config: &Config,
    command: &str,
    symbol: &str,
) -> Result<Vec<SymbolRecord>> {
    let Some(kind) = kind_for_name(command) else {
        bail!("unknown command: {command}");
    };

    let mut controller = controller(config)?;
    match controller.find(&mut BatchHost, kind, Some(symbol)).await {
        Ok(QueryOutcome::Jumped(record)) => Ok(vec![record]),
        Ok(QueryOutcome::Choices(_)) => Ok(controller.pending_results().to_vec()),
        Err(NavError::NoMatches) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn query(config: &Config, command: &str, symbol: &str, json: bool) -> Result<()> {
    let records = query_records(config, command, symbol).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("no matches");
    } else {
        for record in &records {
            println!("{}", record.list_entry());
        }
    }
    Ok(())
}

/// Main entry point.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let log_level = args.parse_log_level()?;
    init_tracing(log_level)?;

    let config = args.resolve_config()?;
    info!(program = %config.program, database_file = %config.database_file, "starting cscope-nav");

    match args.command {
        None | Some(Mode::Session) => session(&config).await,
        Some(Mode::Query {
            command,
            symbol,
            json,
        }) => query(&config, &command, &symbol, json).await,
        Some(Mode::InitConfig) => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            let path = config::init_config(&cwd)?;
            println!("Created {}", path.display());
            Ok(())
        }
    }
}
