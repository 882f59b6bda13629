use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Malformed structure, bad base64, signature mismatch, unsupported
    /// algorithm or a missing mandatory claim.
    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token subject does not match")]
    SubjectMismatch,
}

/// Error type for signing key derivation.
///
/// Raised at startup; a process without a usable key must not serve requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningKeyError {
    #[error("Signing secret is not configured")]
    Missing,

    #[error("Signing secret is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}
