//! Bearer token core for the TeamSphere backend.
//!
//! - Signing key derivation from a base64 secret (HS256, at least 256 bits)
//! - Token issuance and decoding (compact JWT, expiry left to the caller)
//! - Token validation against an expected subject
//! - Password hashing (Argon2id)
//!
//! The service crate defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Issue and validate
//! ```
//! use auth::{ExtraClaims, JwtHandler, SigningKey, TokenValidator};
//! use chrono::Duration;
//!
//! let key = SigningKey::from_bytes(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(key);
//! let token = handler.issue("alice@example.com", ExtraClaims::new(), Duration::hours(1)).unwrap();
//!
//! let validator = TokenValidator::new(handler.clone());
//! assert!(validator.is_valid(&token, "alice@example.com").unwrap());
//! assert!(!validator.is_valid(&token, "bob@example.com").unwrap());
//! ```
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod principal;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::ExtraClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKey;
pub use jwt::SigningKeyError;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::Principal;
