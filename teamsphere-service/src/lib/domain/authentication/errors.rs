use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors raised by the registration and login workflow
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Bad credentials")]
    BadCredentials,

    /// Credentials matched but the identity could not be loaded afterwards.
    #[error("User not found after authentication: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] UserError),

    #[error("Password encoding failed: {0}")]
    PasswordEncoding(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::PasswordEncoding(err.to_string())
    }
}
