//! Process configuration and runtime utilities for quackdock.
//!
//! Everything that is read from the environment is read exactly once, here,
//! into a [`Config`] that the rest of the workspace borrows.

use clap::Parser;
use std::path::PathBuf;

// ============================================================================
// DEFAULTS
// ============================================================================
/// Address the HTTP server binds to when `BIND_ADDR` is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
/// Number of actix worker threads when `WORKERS` is unset.
pub const DEFAULT_WORKERS: usize = 4;
/// Directory receiving timestamped log files when `LOG_DIR` is unset.
pub const DEFAULT_LOG_DIR: &str = "logs";
/// DuckDB's path for a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

// ============================================================================
// CONFIGURATION
// ============================================================================
/// Process-wide settings, constructed once at startup.
///
/// Every flag doubles as an environment variable so that container
/// deployments need no command line at all.
#[derive(Debug, Clone, Parser)]
#[command(name = "quackdock", version, about = "SQL and upsert-upload service over DuckDB")]
pub struct Config {
    /// Socket address for the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND)]
    pub bind: String,
    /// Default local database file. In-memory when unset.
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<String>,
    /// Access token for hosted MotherDuck databases.
    #[arg(long, env = "MOTHERDUCK_TOKEN", hide_env_values = true)]
    pub motherduck_token: Option<String>,
    /// Comma-separated `token[:db_path]` entries. Empty disables auth.
    #[arg(long, env = "API_TOKENS", default_value = "", hide_env_values = true)]
    pub api_tokens: String,
    /// HTTP worker threads.
    #[arg(long, env = "WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
    /// Where log files are written.
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database_path: None,
            motherduck_token: None,
            api_tokens: String::new(),
            workers: DEFAULT_WORKERS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Config {
    /// The local database a request lands in when it names none.
    pub fn local(&self) -> &str {
        self.database_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(IN_MEMORY)
    }
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = Some(path.into());
        self
    }
    pub fn with_motherduck_token(mut self, token: impl Into<String>) -> Self {
        self.motherduck_token = Some(token.into());
        self
    }
    pub fn with_api_tokens(mut self, tokens: impl Into<String>) -> Self {
        self.api_tokens = tokens.into();
        self
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Writes DEBUG level to `<log_dir>/<unix>.log`, INFO to terminal.
#[cfg(feature = "server")]
pub fn log(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;
    let settings = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        settings.clone(),
        std::fs::File::create(config.log_dir.join(format!("{}.log", time)))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        settings.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(std::io::Error::other)
}

/// Register Ctrl+C handler for immediate termination.
/// In-flight uploads are abandoned; their temp files are reclaimed by the OS.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
