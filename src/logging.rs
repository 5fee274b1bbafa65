//! Diagnostic logging setup.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log verbosity selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Progress information
    Info,
    /// Every issued git command
    Debug,
    /// Everything, including README probing
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set, so stdout stays
/// reserved for the final confirmation line.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init(level: LogLevel) -> Result<()> {
    let level = Level::from(level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},stagen={}", Level::WARN, level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
