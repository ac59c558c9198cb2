//! Driving port for blood request listings.
use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{DonorId, DonorRequestView, Error, HospitalId, HospitalRequestView};

/// A hospital's incoming requests split by status.
///
/// `total` counts every request addressed to the hospital, in any status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRequests {
    /// Requests awaiting a decision.
    pub pending_requests: Vec<HospitalRequestView>,
    /// Approved requests not yet fulfilled.
    pub approved_requests: Vec<HospitalRequestView>,
    /// Number of requests addressed to the hospital.
    pub total: usize,
}

/// Driving port for request listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodRequestQuery: Send + Sync {
    /// Requests made by `donor`, newest first.
    async fn list_for_donor(&self, donor: &DonorId) -> Result<Vec<DonorRequestView>, Error>;

    /// Requests addressed to `hospital`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the hospital is missing.
    async fn list_for_hospital(&self, hospital: &HospitalId) -> Result<HospitalRequests, Error>;
}
