//! Port abstraction for donor persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{AccountCredentials, Donor, DonorId, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by donor repository adapters.
    pub enum DonorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "donor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donor repository query failed: {message}",
        /// Another donor already uses this email address.
        DuplicateEmail { email: String } => "donor email already registered: {email}",
    }
}

/// Persistence for donor accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Insert a new donor together with its password hash.
    async fn insert(
        &self,
        donor: &Donor,
        password_hash: &PasswordHash,
    ) -> Result<(), DonorRepositoryError>;

    /// Fetch a donor by identifier.
    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DonorRepositoryError>;

    /// Fetch login material for the donor registered under `email`.
    ///
    /// `email` is expected to be trimmed and lower-cased already.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, DonorRepositoryError>;
}
