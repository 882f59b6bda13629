use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticateCommand;
use crate::domain::authentication::models::AuthenticationResponse;
use crate::domain::authentication::models::RegisterCommand;

/// Port for the registration and login workflow.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated registration data with plain text password
    ///
    /// # Returns
    /// Token whose subject is the registered email
    ///
    /// # Errors
    /// * `Persistence` - Email already registered or store failure
    /// * `PasswordEncoding` - Password could not be hashed
    /// * `Token` - Token generation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticationResponse, AuthError>;

    /// Verify credentials of an existing identity and issue a token.
    ///
    /// # Errors
    /// * `BadCredentials` - Unknown email or wrong password
    /// * `NotFound` - Identity vanished between credential check and lookup
    /// * `Token` - Token generation failed
    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticationResponse, AuthError>;
}

/// One-way password hashing.
///
/// Hashing is CPU bound; implementations must not stall the async runtime.
#[async_trait]
pub trait PasswordEncoder: Send + Sync + 'static {
    /// Hash a plain text password for storage.
    ///
    /// # Errors
    /// * `PasswordEncoding` - Hashing failed
    async fn encode(&self, raw_password: &str) -> Result<String, AuthError>;

    /// Check a plain text password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordEncoding` - Stored hash is unreadable
    async fn matches(
        &self,
        raw_password: &str,
        encoded_password: &str,
    ) -> Result<bool, AuthError>;
}

/// Credential matching policy.
#[async_trait]
pub trait AuthenticationManager: Send + Sync + 'static {
    /// Succeeds only if `password` is the password of the identity `email`.
    ///
    /// # Errors
    /// * `BadCredentials` - Unknown email or password mismatch
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AuthError>;
}
