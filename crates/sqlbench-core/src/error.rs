//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Gateway Errors
    // ─────────────────────────────────────────────────────────────
    /// Non-success HTTP status without a backend-provided message
    #[error("Request failed: {status}")]
    Http { status: u16 },

    /// Network-level failure (connect, timeout, reset)
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The backend answered with an `{"error": ...}` payload
    #[error("{message}")]
    Backend { message: String },

    /// Payload could not be decoded into the expected shape
    #[error("Unexpected response: {message}")]
    Protocol { message: String },

    // ─────────────────────────────────────────────────────────────
    // Local Validation
    // ─────────────────────────────────────────────────────────────
    #[error("{message}")]
    Validation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Every gateway failure is recoverable: the user retries by issuing the
    /// action again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http { .. }
                | Error::Transport { .. }
                | Error::Backend { .. }
                | Error::Protocol { .. }
                | Error::Validation { .. }
        )
    }

    /// Check if this error should abort the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ConfigInvalid { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::http(503);
        assert_eq!(err.to_string(), "Request failed: 503");

        let err = Error::backend("Only SELECT queries are allowed");
        assert_eq!(err.to_string(), "Only SELECT queries are allowed");

        let err = Error::config_invalid("invalid URL 'ftp://x'");
        assert_eq!(err.to_string(), "Invalid configuration: invalid URL 'ftp://x'");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_gateway_errors_are_recoverable() {
        assert!(Error::http(500).is_recoverable());
        assert!(Error::transport("connection refused").is_recoverable());
        assert!(Error::backend("syntax error").is_recoverable());
        assert!(Error::validation("empty").is_recoverable());
        assert!(!Error::config_invalid("bad url").is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::config_invalid("bad url").is_fatal());
        assert!(!Error::config("client").is_fatal());
        assert!(!Error::transport("timeout").is_fatal());
        assert!(!Error::http(404).is_fatal());
    }

    #[test]
    fn test_context_preserves_variant() {
        let res: std::result::Result<(), Error> = Err(Error::http(404));
        let err = res.context("loading problem").unwrap_err();
        assert!(matches!(err, Error::Http { status: 404 }));
    }
}
