//! Port abstraction for hospital persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{AccountCredentials, Hospital, HospitalId, Inventory, PasswordHash, Review};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by hospital repository adapters.
    pub enum HospitalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "hospital repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "hospital repository query failed: {message}",
        /// Another hospital already uses this email address.
        DuplicateEmail { email: String } => "hospital email already registered: {email}",
    }
}

/// Filter applied when listing hospitals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalListFilter {
    /// Case-insensitive city match. `None` lists every hospital.
    pub city: Option<String>,
}

impl HospitalListFilter {
    /// Filter on `city`, ignoring blank input.
    pub fn city(city: Option<&str>) -> Self {
        Self {
            city: city
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        }
    }

    /// Whether `hospital` passes the filter.
    pub fn matches(&self, hospital: &Hospital) -> bool {
        self.city
            .as_deref()
            .is_none_or(|city| hospital.location().is_in_city(city))
    }
}

/// Persistence for hospitals, inventories and reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Insert a new hospital together with its password hash.
    async fn insert(
        &self,
        hospital: &Hospital,
        password_hash: &PasswordHash,
    ) -> Result<(), HospitalRepositoryError>;

    /// Fetch a hospital, with its reviews, by identifier.
    async fn find_by_id(&self, id: &HospitalId)
    -> Result<Option<Hospital>, HospitalRepositoryError>;

    /// Fetch login material for the hospital registered under `email`.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, HospitalRepositoryError>;

    /// List hospitals matching `filter`, ordered by name.
    async fn list(
        &self,
        filter: &HospitalListFilter,
    ) -> Result<Vec<Hospital>, HospitalRepositoryError>;

    /// Overwrite all eight inventory counters of a hospital.
    async fn save_inventory(
        &self,
        id: &HospitalId,
        inventory: &Inventory,
    ) -> Result<(), HospitalRepositoryError>;

    /// Store a review for a hospital.
    async fn add_review(&self, id: &HospitalId, review: &Review)
    -> Result<(), HospitalRepositoryError>;
}
