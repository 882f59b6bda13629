use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Checks that a token belongs to an expected subject and is still live.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    jwt_handler: JwtHandler,
}

impl TokenValidator {
    pub fn new(jwt_handler: JwtHandler) -> Self {
        Self { jwt_handler }
    }

    /// Boolean validity check.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    /// * `expected_subject` - Identity the caller believes owns the token
    ///
    /// # Returns
    /// `true` iff the subject matches exactly and `exp` is strictly in the future
    ///
    /// # Errors
    /// * `InvalidToken` - The token could not be decoded; never folded into `false`
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> Result<bool, JwtError> {
        self.is_valid_at(token, expected_subject, Utc::now())
    }

    pub fn is_valid_at(
        &self,
        token: &str,
        expected_subject: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, JwtError> {
        match self.validate_at(token, expected_subject, now) {
            Ok(_) => Ok(true),
            Err(JwtError::SubjectMismatch) | Err(JwtError::TokenExpired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Token could not be decoded
    /// * `SubjectMismatch` - Token belongs to someone else
    /// * `TokenExpired` - `exp` is not after the current time
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, expected_subject, Utc::now())
    }

    pub fn validate_at(
        &self,
        token: &str,
        expected_subject: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, JwtError> {
        let claims = self.jwt_handler.decode(token)?;

        if claims.sub != expected_subject {
            tracing::debug!("Token subject does not match expected identity");
            return Err(JwtError::SubjectMismatch);
        }

        ensure_not_expired(&claims, now)?;

        Ok(claims)
    }
}

/// Explicit expiry check for already decoded claims.
///
/// # Errors
/// * `TokenExpired` - `exp` is at or before `now`
pub fn ensure_not_expired(claims: &Claims, now: DateTime<Utc>) -> Result<(), JwtError> {
    if claims.is_expired(now.timestamp()) {
        tracing::debug!(exp = claims.exp, "Token expired");
        return Err(JwtError::TokenExpired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;
    use crate::jwt::ExtraClaims;
    use crate::jwt::SigningKey;

    fn handler() -> JwtHandler {
        JwtHandler::new(
            SigningKey::from_bytes(b"validator_secret_at_least_32_bytes!").expect("Failed to build key"),
        )
    }

    #[test]
    fn test_is_valid_fresh_token() {
        let handler = handler();
        let validator = TokenValidator::new(handler.clone());

        let token = handler
            .issue("testuser", ExtraClaims::new(), Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(validator.is_valid(&token, "testuser"), Ok(true));
    }

    #[test]
    fn test_is_valid_different_subject() {
        let handler = handler();
        let validator = TokenValidator::new(handler.clone());

        let token = handler
            .issue("testuser", ExtraClaims::new(), Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(validator.is_valid(&token, "otheruser"), Ok(false));
        assert_eq!(
            validator.validate(&token, "otheruser"),
            Err(JwtError::SubjectMismatch)
        );
    }

    #[test]
    fn test_is_valid_after_short_ttl_elapsed() {
        let handler = handler();
        let validator = TokenValidator::new(handler.clone());

        let token = handler
            .issue("testuser", ExtraClaims::new(), Duration::milliseconds(1))
            .expect("Failed to issue token");
        thread::sleep(std::time::Duration::from_millis(5));

        assert_eq!(validator.is_valid(&token, "testuser"), Ok(false));
    }

    #[test]
    fn test_validate_expired_token() {
        let handler = handler();
        let validator = TokenValidator::new(handler.clone());
        let issued = Utc.timestamp_opt(1_000_000, 0).unwrap();

        let token = handler
            .issue_at("testuser", ExtraClaims::new(), Duration::hours(1), issued)
            .expect("Failed to issue token");

        assert_eq!(
            validator.validate_at(&token, "testuser", issued + Duration::minutes(59)),
            handler.decode(&token)
        );
        assert_eq!(
            validator.validate_at(&token, "testuser", issued + Duration::hours(1)),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(validator.is_valid(&token, "testuser"), Ok(false));
    }

    #[test]
    fn test_is_valid_propagates_invalid_token() {
        let validator = TokenValidator::new(handler());

        let result = validator.is_valid("invalid.token.here", "testuser");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
