use anyhow::Result;

/// Hashes account passwords and checks login attempts against stored hashes
pub trait PasswordHashingService: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;

    /// `Ok(false)` means a well-formed hash that does not match
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool>;
}
