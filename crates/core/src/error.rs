//! Error types for the semantic value layer
//!
//! This module defines every failure a value can report while being built,
//! parsed, or resolved through the type registry.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! - `Initialization`: the initializer is unsupported or malformed
//! - `Decode`: wire or human-readable input could not be parsed
//! - `Validation`: a structural constraint does not hold (SessionID basenames)
//!
//! A decode failure and a validation failure both happen during construction,
//! so [`Error::is_initialization`] is true for all three.

use thiserror::Error;

/// Result type alias for value operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the value layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unsupported or malformed initializer at construction
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Malformed wire or text input
    #[error("Decode error: {0}")]
    Decode(String),

    /// Structural constraint violation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Type name not present in the registry
    #[error("Type not found: {0}")]
    NotFound(String),

    /// Type name already present in the registry
    #[error("Type already defined: {0}")]
    AlreadyDefined(String),

    /// Definition attempted after the registry was sealed
    #[error("Registry sealed, cannot define: {0}")]
    RegistrySealed(String),

    /// Envelope encoding/decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Build an initialization error
    pub fn initialization(msg: impl Into<String>) -> Self {
        Error::Initialization(msg.into())
    }

    /// Build a decode error
    ///
    /// The message is also emitted as a debug event so rejected input can be
    /// traced back to where it was parsed.
    pub fn decode(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::debug!(error = %msg, "decode failure");
        Error::Decode(msg)
    }

    /// Build a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// True for any failure raised while constructing a value
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            Error::Initialization(_) | Error::Decode(_) | Error::Validation(_)
        )
    }

    /// True if the input could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// True if a structural constraint was violated
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::decode(format!("invalid UTF-8: {}", e))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::decode(format!("invalid UTF-8: {}", e))
    }
}
