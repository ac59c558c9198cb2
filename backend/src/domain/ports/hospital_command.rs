//! Driving port for hospital mutations: inventory and reviews.
use async_trait::async_trait;

use crate::domain::{Error, HospitalId, Inventory, InventoryPatch, Rating, Review};

/// Review input. The reviewer name comes from the caller's token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Reviewer name from the caller's token.
    pub reviewer_name: String,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
}

/// Driving port for hospital writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalCommand: Send + Sync {
    /// Merge `patch` over the stored counters and return the new inventory.
    async fn update_inventory(
        &self,
        hospital: &HospitalId,
        patch: &InventoryPatch,
    ) -> Result<Inventory, Error>;

    /// Add a review dated now and return it.
    async fn add_review(&self, hospital: &HospitalId, review: NewReview) -> Result<Review, Error>;
}
