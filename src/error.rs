//! Error handling types for pagebridge
//!
//! `BridgeError` covers infrastructure faults (channel registration,
//! transport, configuration). Per-call outcomes reported by the remote side
//! live in [`crate::sink::CallError`] instead.

use thiserror::Error;

/// Infrastructure error for bridge setup and transport
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A bridge was requested before any channel was registered
    #[error("Channel not registered")]
    ChannelUnset,

    /// A channel was registered twice
    #[error("Channel already registered")]
    ChannelAlreadySet,

    /// A wire method name does not match any known operation
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    /// Envelope values do not line up with the operation's field list
    #[error("Envelope for {operation} expects {expected} fields, got {got}")]
    EnvelopeShape {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    /// The transport went away before the call resolved
    #[error("Channel closed: {message}")]
    ChannelClosed { message: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bridge infrastructure operations
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Create an unknown operation error
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        BridgeError::UnknownOperation { name: name.into() }
    }

    /// Create a channel closed error
    pub fn channel_closed(message: impl Into<String>) -> Self {
        BridgeError::ChannelClosed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        BridgeError::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        assert_eq!(
            BridgeError::unknown_operation("didExplode").to_string(),
            "Unknown operation: didExplode"
        );
        assert_eq!(
            BridgeError::channel_closed("remote dropped").to_string(),
            "Channel closed: remote dropped"
        );
        assert_eq!(
            BridgeError::config("call_timeout_ms must be > 0").to_string(),
            "Invalid configuration: call_timeout_ms must be > 0"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BridgeError = io.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
