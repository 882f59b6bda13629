pub mod authentication_manager;
pub mod password_encoder;

pub use authentication_manager::DaoAuthenticationManager;
pub use password_encoder::Argon2PasswordEncoder;
