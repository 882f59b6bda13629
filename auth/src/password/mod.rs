//! Password storage with Argon2id PHC strings.

mod argon2;
mod errors;

pub use self::argon2::PasswordHasher;
pub use self::errors::PasswordError;
