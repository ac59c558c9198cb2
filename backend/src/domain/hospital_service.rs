//! Hospital reads, inventory updates and reviews.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    HospitalCommand, HospitalListFilter, HospitalQuery, HospitalRepository, NewReview,
};
use crate::domain::repository_errors::map_lookup_error;
use crate::domain::{Error, Hospital, HospitalId, Inventory, InventoryPatch, Review};

pub(crate) const HOSPITAL_NOT_FOUND: &str = "Hospital not found";

/// Hospital service implementing [`HospitalQuery`] and [`HospitalCommand`].
#[derive(Clone)]
pub struct HospitalService<H> {
    hospitals: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<H> HospitalService<H> {
    /// Build the service over a hospital repository and a clock for review dates.
    pub fn new(hospitals: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self { hospitals, clock }
    }
}

impl<H> HospitalService<H>
where
    H: HospitalRepository,
{
    async fn require(&self, hospital: &HospitalId) -> Result<Hospital, Error> {
        self.hospitals
            .find_by_id(hospital)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found(HOSPITAL_NOT_FOUND))
    }
}

#[async_trait]
impl<H> HospitalQuery for HospitalService<H>
where
    H: HospitalRepository,
{
    async fn profile(&self, hospital: &HospitalId) -> Result<Hospital, Error> {
        self.require(hospital).await
    }

    async fn list(&self, filter: &HospitalListFilter) -> Result<Vec<Hospital>, Error> {
        self.hospitals
            .list(filter)
            .await
            .map_err(map_lookup_error)
    }

    async fn get(&self, hospital: &HospitalId) -> Result<Hospital, Error> {
        self.require(hospital).await
    }
}

#[async_trait]
impl<H> HospitalCommand for HospitalService<H>
where
    H: HospitalRepository,
{
    async fn update_inventory(
        &self,
        hospital: &HospitalId,
        patch: &InventoryPatch,
    ) -> Result<Inventory, Error> {
        let mut current = self.require(hospital).await?;
        if patch.is_empty() {
            return Ok(*current.inventory());
        }
        current.inventory_mut().merge(patch);
        let inventory = *current.inventory();
        self.hospitals
            .save_inventory(hospital, &inventory)
            .await
            .map_err(map_lookup_error)?;
        info!(hospital_id = %hospital, counters = patch.entries().count(), "inventory updated");
        Ok(inventory)
    }

    async fn add_review(&self, hospital: &HospitalId, review: NewReview) -> Result<Review, Error> {
        self.require(hospital).await?;
        let NewReview {
            reviewer_name,
            rating,
            comment,
        } = review;
        let review = Review::new(reviewer_name, rating, comment, self.clock.utc()).map_err(
            |err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "userName",
                    "code": "missing_field",
                }))
            },
        )?;
        self.hospitals
            .add_review(hospital, &review)
            .await
            .map_err(map_lookup_error)?;
        info!(hospital_id = %hospital, rating = review.rating().value(), "review added");
        Ok(review)
    }
}

#[cfg(test)]
#[path = "hospital_service_tests.rs"]
mod tests;
