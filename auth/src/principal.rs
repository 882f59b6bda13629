/// Capabilities an identity must expose to be authenticated and issued tokens.
pub trait Principal {
    /// Stable identifier placed in the token `sub` claim.
    fn subject(&self) -> &str;

    /// Stored password hash used for credential matching.
    fn credential_hash(&self) -> &str;

    /// Granted authority labels (e.g. `ROLE_USER`).
    fn authorities(&self) -> Vec<String>;
}
