use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::ExtraClaims;
use super::errors::JwtError;
use super::key::SigningKey;

/// JWT token handler for issuing and decoding tokens.
///
/// Signs with HS256 (HMAC with SHA-256) using a single process-wide key.
/// Decoding verifies structure, algorithm and signature but not expiry;
/// expiry is left to [`TokenValidator`](super::TokenValidator).
#[derive(Debug, Clone)]
pub struct JwtHandler {
    signing_key: SigningKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler around a derived signing key.
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject`, valid for `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts (an email address)
    /// * `extra` - Additional claims; `sub`, `iat` and `exp` keys are ignored
    /// * `ttl` - Lifetime; zero or negative yields an already expired token
    ///
    /// # Returns
    /// Compact `header.payload.signature` token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration is out of range, or claims could not
    ///   be serialized or signed
    pub fn issue(
        &self,
        subject: &str,
        extra: ExtraClaims,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, extra, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        extra: ExtraClaims,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, now, ttl)?.with_extra_claims(extra);
        self.encode(&claims)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, self.signing_key.encoding_key())
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and verify a JWT token.
    ///
    /// Succeeds for any well-formed token signed with the active key,
    /// whether or not it has expired.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, bad signature, wrong algorithm
    ///   or missing mandatory claim
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        // Mandatory claims are enforced by the Claims type itself
        validation.required_spec_claims.clear();

        decode::<Claims>(token, self.signing_key.decoding_key(), &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }

    /// Decode a token and project a single value out of its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - See [`JwtHandler::decode`]
    pub fn extract_claim<T, F>(&self, token: &str, selector: F) -> Result<T, JwtError>
    where
        F: FnOnce(&Claims) -> T,
    {
        let claims = self.decode(token)?;
        Ok(selector(&claims))
    }
}
