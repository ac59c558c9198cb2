//! `RequestNotifier` that records each notice as a structured log event.
//!
//! Stands in for an email or push channel; the event carries everything a
//! mail relay tailing the logs would need.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{BloodRequestNotice, RequestNotifier, RequestNotifierError};

/// Logs each new-request notice under the `bloodbank::notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestNotifier;

impl TracingRequestNotifier {
    /// Create the notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RequestNotifier for TracingRequestNotifier {
    async fn blood_request_created(
        &self,
        notice: &BloodRequestNotice,
    ) -> Result<(), RequestNotifierError> {
        info!(
            target: "bloodbank::notify",
            request_id = %notice.request_id,
            hospital = %notice.hospital_name,
            to = %notice.hospital_email,
            donor = %notice.donor_name,
            reply_to = %notice.donor_email,
            patient = %notice.patient_name,
            blood_group = notice.blood_group.as_str(),
            units = notice.units_required,
            priority = notice.priority.as_str(),
            "new blood request for hospital"
        );
        Ok(())
    }
}
