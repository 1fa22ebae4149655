//! Shared error types across pubwire crates.

use thiserror::Error;

/// Stable error classification (safe to log and match on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Wire payload missing required fields or wrong-typed.
    Decode,
    /// A capability constructor refused the source value.
    Conversion,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config/schema version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Decode => "DECODE",
            ErrorCode::Conversion => "CONVERSION",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Rejection raised when a capability value cannot be rebuilt as `target`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert into {target}: {reason}")]
pub struct ConversionError {
    /// Name of the concrete type that refused the source.
    pub target: &'static str,
    pub reason: String,
}

impl ConversionError {
    pub fn new<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self {
            target: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PubwireError>;

/// Unified error type used by core and stream.
#[derive(Debug, Error)]
pub enum PubwireError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PubwireError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PubwireError::Decode(_) => ErrorCode::Decode,
            PubwireError::Conversion(_) => ErrorCode::Conversion,
            PubwireError::BadConfig(_) => ErrorCode::BadConfig,
            PubwireError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PubwireError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<serde_json::Error> for PubwireError {
    fn from(e: serde_json::Error) -> Self {
        PubwireError::Decode(e.to_string())
    }
}
