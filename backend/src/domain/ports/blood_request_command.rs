//! Driving port for the blood request workflow.
//!
//! Transitions are deliberately thin: creation checks availability once,
//! hospital status updates are unguarded, and nothing touches inventory
//! after creation.

use async_trait::async_trait;

use crate::domain::{
    BloodRequest, BloodRequestId, DonorId, Error, HospitalId, NewBloodRequest, RequestStatus,
};

/// Hospital decision on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// New status; only hospital decisions are accepted.
    pub status: RequestStatus,
    /// Note replacing the previous one.
    pub notes: Option<String>,
}

/// Driving port for request submission and decisions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodRequestCommand: Send + Sync {
    /// Submit a request from `donor` to `hospital`.
    ///
    /// # Errors
    ///
    /// - `not_found` when the hospital or donor is missing.
    /// - `invalid_request` when the hospital lacks the requested units.
    async fn create(
        &self,
        donor: &DonorId,
        hospital: &HospitalId,
        request: NewBloodRequest,
    ) -> Result<BloodRequestId, Error>;

    /// Record a hospital decision.
    ///
    /// # Errors
    ///
    /// - `not_found` when the request is missing.
    /// - `forbidden` when the request belongs to another hospital.
    async fn update_status(
        &self,
        hospital: &HospitalId,
        request: &BloodRequestId,
        update: StatusUpdate,
    ) -> Result<BloodRequest, Error>;

    /// Cancel a pending request on behalf of its donor.
    ///
    /// # Errors
    ///
    /// - `not_found` when the request is missing.
    /// - `forbidden` when another donor made the request.
    /// - `invalid_request` once the request has left `PENDING`.
    async fn cancel(&self, donor: &DonorId, request: &BloodRequestId)
    -> Result<BloodRequest, Error>;
}
