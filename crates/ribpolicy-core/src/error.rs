//! Shared error type across ribpolicy crates.

use thiserror::Error;

/// Stable error codes reported to callers (policy-update handlers, CLIs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Descriptor failed policy/statement construction.
    Config,
    /// Malformed input (YAML/JSON, unsupported version).
    BadRequest,
    /// No policy installed.
    NotFound,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RibPolicyError>;

/// Unified error type used by core and engine.
#[derive(Debug, Error)]
pub enum RibPolicyError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RibPolicyError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RibPolicyError::Config(_) => ErrorCode::Config,
            RibPolicyError::BadRequest(_) => ErrorCode::BadRequest,
            RibPolicyError::NotFound(_) => ErrorCode::NotFound,
            RibPolicyError::Internal(_) => ErrorCode::Internal,
        }
    }
}
