//! Logging infrastructure for nrlink
//!
//! This module provides configurable logging using the `tracing` crate,
//! protocol message logging utilities, and hex formatting for debugging.

use std::fmt;
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// This should be called once at startup. The log level can be overridden
/// by the `RUST_LOG` environment variable.
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .init();
}

/// Initialize logging with a custom filter string.
///
/// Allows fine-grained control over which modules log at which levels,
/// e.g. `"info,nrlink_rlc=debug"`.
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .init();
}

/// Protocol direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Incoming/received message
    Rx,
    /// Outgoing/transmitted message
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Formats bytes as a compact hex string without separators.
///
/// Suitable for single-line logging of short PDUs.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Log a protocol message at debug level with a hex dump at trace level.
pub fn log_protocol_message(protocol: &str, direction: Direction, msg_type: &str, data: &[u8]) {
    tracing::debug!(
        protocol = protocol,
        direction = %direction,
        msg_type = msg_type,
        len = data.len(),
        "{} {} message",
        direction,
        protocol
    );
    tracing::trace!(
        protocol = protocol,
        hex = %format_hex_compact(data),
        "{} {} payload",
        direction,
        protocol
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("bogus".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_format_hex_compact() {
        assert_eq!(format_hex_compact(&[0x0a, 0xff, 0x00]), "0aff00");
        assert_eq!(format_hex_compact(&[]), "");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", Direction::Rx), "RX");
        assert_eq!(format!("{}", Direction::Tx), "TX");
    }
}
