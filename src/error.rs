//! Error types for repstream.

use thiserror::Error;

/// Main error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// I/O error during socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level error (bind, send, receive).
    #[error("Transport error: {0}")]
    Transport(#[from] zeromq::ZmqError),

    /// Protocol error (malformed request, contract violation).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid construction-time configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The transport channel was closed and cannot serve further exchanges.
    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type alias using BridgeError.
pub type Result<T> = std::result::Result<T, BridgeError>;
