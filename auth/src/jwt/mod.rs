pub mod claims;
pub mod errors;
pub mod handler;
pub mod key;
pub mod validator;

pub use claims::Claims;
pub use claims::ExtraClaims;
pub use errors::JwtError;
pub use errors::SigningKeyError;
pub use handler::JwtHandler;
pub use key::SigningKey;
pub use validator::ensure_not_expired;
pub use validator::TokenValidator;
