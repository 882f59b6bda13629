use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::SigningKeyError;

/// Symmetric HMAC-SHA256 key derived from a base64-encoded secret.
///
/// The same secret always yields the same key. Cloning shares nothing mutable,
/// so one key can be handed to every request handler.
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Minimum accepted key length for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Derive a signing key from a base64-encoded secret.
    ///
    /// # Arguments
    /// * `secret` - Standard (padded) base64 encoding of the raw key bytes
    ///
    /// # Returns
    /// SigningKey usable for both signing and verification
    ///
    /// # Errors
    /// * `Missing` - Secret is blank or an unresolved `${...}` placeholder
    /// * `InvalidBase64` - Secret is not valid base64
    /// * `TooShort` - Decoded key is shorter than 256 bits
    pub fn from_base64(secret: &str) -> Result<Self, SigningKeyError> {
        let secret = secret.trim();
        if secret.is_empty() || (secret.starts_with("${") && secret.ends_with('}')) {
            return Err(SigningKeyError::Missing);
        }

        let bytes = STANDARD
            .decode(secret)
            .map_err(|e| SigningKeyError::InvalidBase64(e.to_string()))?;

        Self::from_bytes(&bytes)
    }

    /// Build a signing key from raw key bytes.
    ///
    /// # Errors
    /// * `TooShort` - Key is shorter than 256 bits
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningKeyError> {
        if bytes.len() < Self::MIN_LENGTH {
            return Err(SigningKeyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
