//! Port abstraction for blood request persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{
    BloodRequest, BloodRequestId, DonorId, DonorRequestView, HospitalId, HospitalRequestView,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blood request repository adapters.
    pub enum BloodRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blood request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blood request repository query failed: {message}",
    }
}

/// Persistence for blood requests and their timelines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodRequestRepository: Send + Sync {
    /// Insert a freshly submitted request.
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: &BloodRequestId,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError>;

    /// Requests made by `donor`, newest first, with hospital contact details.
    async fn list_for_donor(
        &self,
        donor: &DonorId,
    ) -> Result<Vec<DonorRequestView>, BloodRequestRepositoryError>;

    /// Requests addressed to `hospital`, newest first, with donor contact details.
    async fn list_for_hospital(
        &self,
        hospital: &HospitalId,
    ) -> Result<Vec<HospitalRequestView>, BloodRequestRepositoryError>;

    /// Persist status, notes, response date and timeline of `request`.
    async fn save_status(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError>;
}
