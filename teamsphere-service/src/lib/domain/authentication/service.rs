use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticateCommand;
use crate::domain::authentication::models::AuthenticationResponse;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthenticationManager;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::authentication::ports::PasswordEncoder;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Registration and login workflow.
///
/// Credential matching is delegated to the [`AuthenticationManager`]; this
/// service never compares password hashes itself.
pub struct AuthenticationService<UR, PE, AM>
where
    UR: UserRepository,
    PE: PasswordEncoder,
    AM: AuthenticationManager,
{
    repository: Arc<UR>,
    password_encoder: Arc<PE>,
    authentication_manager: Arc<AM>,
    authenticator: Arc<Authenticator>,
}

impl<UR, PE, AM> AuthenticationService<UR, PE, AM>
where
    UR: UserRepository,
    PE: PasswordEncoder,
    AM: AuthenticationManager,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store
    /// * `password_encoder` - Hashes passwords at registration
    /// * `authentication_manager` - Verifies credentials at login
    /// * `authenticator` - Issues tokens with the configured lifetime
    pub fn new(
        repository: Arc<UR>,
        password_encoder: Arc<PE>,
        authentication_manager: Arc<AM>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            password_encoder,
            authentication_manager,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, PE, AM> AuthenticationServicePort for AuthenticationService<UR, PE, AM>
where
    UR: UserRepository,
    PE: PasswordEncoder,
    AM: AuthenticationManager,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticationResponse, AuthError> {
        tracing::info!(email = %command.email, "Registering new user");

        let password_hash = self.password_encoder.encode(&command.password).await?;
        let user = User::new(
            command.first_name,
            command.last_name,
            command.email,
            password_hash,
        );

        let saved_user = self.repository.save(user).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist new user");
            AuthError::from(e)
        })?;

        let token = self.authenticator.generate_token(&saved_user)?;

        tracing::info!(email = %saved_user.email, user_id = %saved_user.id, "User registered successfully");
        Ok(AuthenticationResponse { token })
    }

    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticationResponse, AuthError> {
        tracing::info!(email = %command.email, "Authenticating user");

        self.authentication_manager
            .authenticate(command.email.as_str(), &command.password)
            .await?;

        let user = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .ok_or_else(|| {
                tracing::error!(email = %command.email, "User missing after successful credential check");
                AuthError::NotFound(command.email.to_string())
            })?;

        let token = self.authenticator.generate_token(&user)?;

        tracing::info!(email = %user.email, "User authenticated successfully");
        Ok(AuthenticationResponse { token })
    }
}
