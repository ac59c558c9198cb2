//! Donor self-service reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{BloodRequestRepository, DonorQuery, DonorRepository};
use crate::domain::repository_errors::{map_lookup_error, map_request_error};
use crate::domain::{DonorId, DonorProfile, DonorRequestView, Error};

/// Donor service implementing the [`DonorQuery`] driving port.
#[derive(Clone)]
pub struct DonorService<D, R> {
    donors: Arc<D>,
    requests: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<D, R> DonorService<D, R> {
    /// Build the service over donor and request repositories.
    pub fn new(donors: Arc<D>, requests: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            donors,
            requests,
            clock,
        }
    }
}

#[async_trait]
impl<D, R> DonorQuery for DonorService<D, R>
where
    D: DonorRepository,
    R: BloodRequestRepository,
{
    async fn profile(&self, donor: &DonorId) -> Result<DonorProfile, Error> {
        let found = self
            .donors
            .find_by_id(donor)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;
        Ok(DonorProfile::at(found, self.clock.utc()))
    }

    async fn requests(&self, donor: &DonorId) -> Result<Vec<DonorRequestView>, Error> {
        self.requests
            .list_for_donor(donor)
            .await
            .map_err(map_request_error)
    }
}
