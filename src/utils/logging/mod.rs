//! Logging setup
//!
//! Installs a `tracing` subscriber for the binary and for tests that want to
//! see server output. Library code only emits events; it never installs a
//! subscriber on its own.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Supported log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = crate::ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(crate::ProviderError::config(format!(
                "Invalid log level: {}",
                s
            ))),
        }
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(crate::ProviderError::config(format!(
                "Invalid log format: {}",
                s
            ))),
        }
    }
}

/// Initialize the global subscriber with plain text output.
///
/// `RUST_LOG` wins over `level` when set. Calling this more than once is a
/// no-op, so tests can call it freely.
pub fn init_logging(level: LogLevel) {
    init_logging_with_format(level, LogFormat::Text);
}

/// Initialize the global subscriber in the given format
pub fn init_logging_with_format(level: LogLevel, format: LogFormat) {
    let default_directive = Level::from(level).to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };
}
