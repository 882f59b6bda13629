use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Application-supplied claims embedded next to the standard ones.
pub type ExtraClaims = BTreeMap<String, serde_json::Value>;

/// Claim names owned by [`Claims`]; extra claims with these keys are dropped.
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Decoded token payload.
///
/// `sub`, `iat` and `exp` are mandatory. Everything else is flattened from
/// `extra`, kept in key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (email of the token owner)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: ExtraClaims,
}

impl Claims {
    /// Build claims issued at `now` that expire after `ttl`.
    ///
    /// A zero or negative `ttl` produces claims that are already expired.
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable date range
    pub fn new(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;

        Ok(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            extra: ExtraClaims::new(),
        })
    }

    /// Merge extra claims, skipping reserved names.
    pub fn with_extra_claims(mut self, extra: ExtraClaims) -> Self {
        for (key, value) in extra {
            if !RESERVED_CLAIMS.contains(&key.as_str()) {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        if RESERVED_CLAIMS.contains(&key.as_str()) {
            return self;
        }
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key, json_value);
        }
        self
    }

    /// Subject claim.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Issued-at claim as a UTC timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiration claim as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Look up a custom field.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Check if token is expired.
    ///
    /// A token is only live while `exp` is strictly after `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
