//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing failed or the stored hash could not be parsed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies account passwords.
///
/// Adapters are expected to move CPU-heavy work off the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce an encoded hash for `password`.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against a previously produced hash.
    ///
    /// A mismatch is `Ok(false)`, not an error.
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
