use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::ports::PasswordEncoder;

/// Password encoder backed by the shared Argon2id hasher.
///
/// Hashing runs on the blocking thread pool so request workers stay free.
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    hasher: PasswordHasher,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self {
            hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl PasswordEncoder for Argon2PasswordEncoder {
    async fn encode(&self, raw_password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let raw_password = raw_password.to_string();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&raw_password))
            .await
            .map_err(|e| AuthError::PasswordEncoding(e.to_string()))??;
        Ok(hash)
    }

    async fn matches(
        &self,
        raw_password: &str,
        encoded_password: &str,
    ) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let raw_password = raw_password.to_string();
        let encoded_password = encoded_password.to_string();

        let matched =
            tokio::task::spawn_blocking(move || hasher.verify(&raw_password, &encoded_password))
                .await
                .map_err(|e| AuthError::PasswordEncoding(e.to_string()))??;
        Ok(matched)
    }
}
