//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are stored as PHC strings so parameters travel with each hash.
//! Both operations run on the blocking pool; Argon2 is deliberately slow.

use argon2::password_hash::{PasswordHash as PhcHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher using Argon2id defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| PasswordHash::new(phc.to_string()))
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(password: &str, encoded: &str) -> Result<bool, PasswordHasherError> {
    let parsed = PhcHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hash(err.to_string())),
    }
}

fn join_error(err: task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        task::spawn_blocking(move || verify_blocking(&password, &encoded))
            .await
            .map_err(join_error)?
    }
}
