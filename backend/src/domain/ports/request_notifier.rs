//! Port for telling a hospital that a new blood request arrived.
use async_trait::async_trait;

use crate::domain::{BloodGroup, BloodRequestId, Priority};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification adapters.
    pub enum RequestNotifierError {
        /// The notification could not be delivered.
        Delivery { message: String } => "request notification failed: {message}",
    }
}

/// Summary of a new request sent to the receiving hospital.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodRequestNotice {
    /// Identifier of the new request.
    pub request_id: BloodRequestId,
    /// Display name of the receiving hospital.
    pub hospital_name: String,
    /// Address the notice is delivered to.
    pub hospital_email: String,
    /// Name of the requesting donor.
    pub donor_name: String,
    /// Donor address; replies from the hospital go here.
    pub donor_email: String,
    /// Patient the blood is requested for.
    pub patient_name: String,
    /// Requested blood group.
    pub blood_group: BloodGroup,
    /// Units requested.
    pub units_required: u32,
    /// Urgency of the request.
    pub priority: Priority,
}

/// Outbound port for new-request notices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestNotifier: Send + Sync {
    /// Announce a newly created request to its hospital.
    async fn blood_request_created(
        &self,
        notice: &BloodRequestNotice,
    ) -> Result<(), RequestNotifierError>;
}
