use serde::Serialize;

use crate::domain::user::models::EmailAddress;

/// Command to register a new identity.
#[derive(Debug)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: EmailAddress,
    /// Plain text password (hashed by the service)
    pub password: String,
}

impl RegisterCommand {
    pub fn new(
        first_name: String,
        last_name: Option<String>,
        email: EmailAddress,
        password: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command to log in with existing credentials.
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl AuthenticateCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationResponse {
    pub token: String,
}
