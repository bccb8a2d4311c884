//! Error types for nrlink

use thiserror::Error;

/// Error types for the nrlink workspace.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Protocol-related errors.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// ASN.1 encoding errors.
    #[error("ASN.1 encoding error: {0}")]
    Asn1Encode(String),

    /// ASN.1 decoding errors.
    #[error("ASN.1 decoding error: {0}")]
    Asn1Decode(String),

    /// State machine errors.
    #[error("State machine error: {0}")]
    StateMachine(String),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type for nrlink operations.
pub type Result<T> = std::result::Result<T, Error>;
