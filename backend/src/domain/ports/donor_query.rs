//! Driving port for donor self-service reads.
use async_trait::async_trait;

use crate::domain::{DonorId, DonorProfile, DonorRequestView, Error};

/// Driving port for donor reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorQuery: Send + Sync {
    /// The donor's profile with eligibility evaluated now.
    async fn profile(&self, donor: &DonorId) -> Result<DonorProfile, Error>;

    /// The donor's requests, newest first.
    async fn requests(&self, donor: &DonorId) -> Result<Vec<DonorRequestView>, Error>;
}
