//! Driving port for hospital reads.
use async_trait::async_trait;

use crate::domain::{Error, Hospital, HospitalId};

use super::HospitalListFilter;

/// Driving port for hospital reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalQuery: Send + Sync {
    /// The authenticated hospital's own record.
    async fn profile(&self, hospital: &HospitalId) -> Result<Hospital, Error>;

    /// Hospitals matching `filter`.
    async fn list(&self, filter: &HospitalListFilter) -> Result<Vec<Hospital>, Error>;

    /// A single hospital by id.
    async fn get(&self, hospital: &HospitalId) -> Result<Hospital, Error>;
}
