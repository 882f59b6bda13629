use std::sync::Arc;

use async_trait::async_trait;
use auth::Principal;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::ports::AuthenticationManager;
use crate::domain::authentication::ports::PasswordEncoder;
use crate::user::ports::UserRepository;

/// Credential matching against the user store.
///
/// Unknown emails and wrong passwords both yield `BadCredentials` so callers
/// cannot probe which emails are registered.
pub struct DaoAuthenticationManager<UR, PE>
where
    UR: UserRepository,
    PE: PasswordEncoder,
{
    repository: Arc<UR>,
    password_encoder: Arc<PE>,
}

impl<UR, PE> DaoAuthenticationManager<UR, PE>
where
    UR: UserRepository,
    PE: PasswordEncoder,
{
    pub fn new(repository: Arc<UR>, password_encoder: Arc<PE>) -> Self {
        Self {
            repository,
            password_encoder,
        }
    }
}

#[async_trait]
impl<UR, PE> AuthenticationManager for DaoAuthenticationManager<UR, PE>
where
    UR: UserRepository,
    PE: PasswordEncoder,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::info!(email, "Authentication failed: unknown email");
                return Err(AuthError::BadCredentials);
            }
        };

        if !self
            .password_encoder
            .matches(password, user.credential_hash())
            .await?
        {
            tracing::info!(email, "Authentication failed: password mismatch");
            return Err(AuthError::BadCredentials);
        }

        Ok(())
    }
}
