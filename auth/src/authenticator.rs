use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::ExtraClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningKey;
use crate::jwt::SigningKeyError;
use crate::jwt::TokenValidator;
use crate::principal::Principal;

/// Token service bound to the configured signing key and token lifetime.
///
/// Issues tokens for principals and checks presented tokens against them.
/// Immutable after construction and safe to share across requests.
#[derive(Debug, Clone)]
pub struct Authenticator {
    jwt_handler: JwtHandler,
    validator: TokenValidator,
    expiration: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Key used to sign and verify every token
    /// * `expiration` - Lifetime of issued tokens
    pub fn new(signing_key: SigningKey, expiration: Duration) -> Self {
        let jwt_handler = JwtHandler::new(signing_key);
        Self {
            validator: TokenValidator::new(jwt_handler.clone()),
            jwt_handler,
            expiration,
        }
    }

    /// Create an authenticator from a base64-encoded secret.
    ///
    /// # Errors
    /// * `SigningKeyError` - Secret is missing, not base64, or too short
    pub fn from_base64_secret(secret: &str, expiration: Duration) -> Result<Self, SigningKeyError> {
        Ok(Self::new(SigningKey::from_base64(secret)?, expiration))
    }

    /// Lifetime applied to every issued token.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Generate a token for a principal without extra claims.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<P: Principal + ?Sized>(&self, principal: &P) -> Result<String, JwtError> {
        self.generate_token_with_claims(ExtraClaims::new(), principal)
    }

    /// Generate a token for a principal carrying additional claims.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token_with_claims<P: Principal + ?Sized>(
        &self,
        extra: ExtraClaims,
        principal: &P,
    ) -> Result<String, JwtError> {
        tracing::debug!(subject = principal.subject(), "Generating token");
        self.jwt_handler
            .issue(principal.subject(), extra, self.expiration)
    }

    /// Extract the subject (username) of a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token could not be decoded
    pub fn extract_username(&self, token: &str) -> Result<String, JwtError> {
        self.extract_claim(token, |claims| claims.sub.clone())
    }

    /// Extract a single value from a token's claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Token could not be decoded
    pub fn extract_claim<T, F>(&self, token: &str, selector: F) -> Result<T, JwtError>
    where
        F: FnOnce(&Claims) -> T,
    {
        self.jwt_handler.extract_claim(token, selector)
    }

    /// Check a token against the principal it claims to belong to.
    ///
    /// # Returns
    /// `true` iff the subject matches and the token has not expired
    ///
    /// # Errors
    /// * `InvalidToken` - Token could not be decoded
    pub fn is_token_valid<P: Principal + ?Sized>(
        &self,
        token: &str,
        principal: &P,
    ) -> Result<bool, JwtError> {
        let is_valid = self.validator.is_valid(token, principal.subject())?;
        tracing::debug!(subject = principal.subject(), is_valid, "Token validation result");
        Ok(is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str =
        "dGhpcy1pcy1hLXZlcnktc2VjdXJlLXNlY3JldC1rZXktZm9yLXRlc3RpbmctcHVycG9zZXMtb25seQo=";

    struct TestPrincipal {
        username: String,
    }

    impl TestPrincipal {
        fn new(username: &str) -> Self {
            Self {
                username: username.to_string(),
            }
        }
    }

    impl Principal for TestPrincipal {
        fn subject(&self) -> &str {
            &self.username
        }

        fn credential_hash(&self) -> &str {
            "password"
        }

        fn authorities(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn authenticator(expiration: Duration) -> Authenticator {
        Authenticator::from_base64_secret(SECRET, expiration).expect("Failed to build authenticator")
    }

    #[test]
    fn test_generate_token_creates_valid_token() {
        let authenticator = authenticator(Duration::hours(1));
        let principal = TestPrincipal::new("testuser");

        let token = authenticator
            .generate_token(&principal)
            .expect("Failed to generate token");

        assert_eq!(
            authenticator.extract_username(&token),
            Ok("testuser".to_string())
        );
        assert_eq!(authenticator.is_token_valid(&token, &principal), Ok(true));
    }

    #[test]
    fn test_is_token_valid_expired_token() {
        let authenticator = authenticator(Duration::milliseconds(1));
        let principal = TestPrincipal::new("testuser");

        let token = authenticator
            .generate_token(&principal)
            .expect("Failed to generate token");
        std::thread::sleep(std::time::Duration::from_millis(5));

        assert_eq!(authenticator.is_token_valid(&token, &principal), Ok(false));
    }

    #[test]
    fn test_is_token_valid_different_user() {
        let authenticator = authenticator(Duration::hours(1));

        let token = authenticator
            .generate_token(&TestPrincipal::new("testuser"))
            .expect("Failed to generate token");

        assert_eq!(
            authenticator.is_token_valid(&token, &TestPrincipal::new("otheruser")),
            Ok(false)
        );
    }

    #[test]
    fn test_extract_claim_with_extra_claims() {
        let authenticator = authenticator(Duration::hours(1));
        let mut extra = ExtraClaims::new();
        extra.insert("role".to_string(), serde_json::json!("ROLE_USER"));

        let token = authenticator
            .generate_token_with_claims(extra, &TestPrincipal::new("testuser"))
            .expect("Failed to generate token");

        let role = authenticator
            .extract_claim(&token, |claims| claims.extra("role").cloned())
            .expect("Failed to extract claim");
        assert_eq!(role, Some(serde_json::json!("ROLE_USER")));

        let lifetime = authenticator
            .extract_claim(&token, |claims| claims.exp - claims.iat)
            .expect("Failed to extract claim");
        assert_eq!(lifetime, authenticator.expiration().num_seconds());
    }

    #[test]
    fn test_from_base64_secret_rejects_missing_secret() {
        let result = Authenticator::from_base64_secret("", Duration::hours(1));
        assert!(matches!(result, Err(SigningKeyError::Missing)));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator(Duration::hours(1));

        let result = authenticator.is_token_valid("invalid.token.here", &TestPrincipal::new("testuser"));
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
