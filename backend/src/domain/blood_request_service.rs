//! Blood request workflow: creation, hospital decisions and donor
//! cancellation.
//!
//! The availability check at creation is a single read of one inventory
//! counter. Nothing here reserves or decrements stock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::hospital_service::HOSPITAL_NOT_FOUND;
use crate::domain::repository_errors::{map_lookup_error, map_request_error};
use crate::domain::ports::{
    BloodRequestCommand, BloodRequestNotice, BloodRequestQuery, BloodRequestRepository,
    DonorRepository, HospitalRepository, HospitalRequests, RequestNotifier, StatusUpdate,
};
use crate::domain::{
    BloodRequest, BloodRequestId, DonorId, DonorRequestView, Error, HospitalId, NewBloodRequest,
    RequestStatus,
};

const REQUEST_NOT_FOUND: &str = "Request not found";
const NOT_AUTHORIZED: &str = "Not authorized";

/// Blood request service implementing the request driving ports.
#[derive(Clone)]
pub struct BloodRequestService<H, D, R> {
    hospitals: Arc<H>,
    donors: Arc<D>,
    requests: Arc<R>,
    notifier: Arc<dyn RequestNotifier>,
    clock: Arc<dyn Clock>,
}

impl<H, D, R> BloodRequestService<H, D, R> {
    /// Build the service from its repositories, notifier and clock.
    pub fn new(
        hospitals: Arc<H>,
        donors: Arc<D>,
        requests: Arc<R>,
        notifier: Arc<dyn RequestNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hospitals,
            donors,
            requests,
            notifier,
            clock,
        }
    }
}

impl<H, D, R> BloodRequestService<H, D, R>
where
    H: HospitalRepository,
    D: DonorRepository,
    R: BloodRequestRepository,
{
    async fn require_request(&self, id: &BloodRequestId) -> Result<BloodRequest, Error> {
        self.requests
            .find_by_id(id)
            .await
            .map_err(map_request_error)?
            .ok_or_else(|| Error::not_found(REQUEST_NOT_FOUND))
    }

    async fn notify(&self, notice: BloodRequestNotice) {
        if let Err(error) = self.notifier.blood_request_created(&notice).await {
            warn!(
                request_id = %notice.request_id,
                hospital_email = %notice.hospital_email,
                %error,
                "failed to notify hospital of new blood request"
            );
        }
    }
}

#[async_trait]
impl<H, D, R> BloodRequestCommand for BloodRequestService<H, D, R>
where
    H: HospitalRepository,
    D: DonorRepository,
    R: BloodRequestRepository,
{
    async fn create(
        &self,
        donor: &DonorId,
        hospital: &HospitalId,
        request: NewBloodRequest,
    ) -> Result<BloodRequestId, Error> {
        let target = self
            .hospitals
            .find_by_id(hospital)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found(HOSPITAL_NOT_FOUND))?;

        let group = request.blood_group();
        let units = request.units_required();
        if !target.inventory().is_available(group, units) {
            return Err(
                Error::invalid_request("Required blood units not available").with_details(json!({
                    "field": "unitsRequired",
                    "code": "insufficient_inventory",
                    "bloodGroup": group,
                    "requested": units,
                    "available": target.inventory().units(group),
                })),
            );
        }

        let requester = self
            .donors
            .find_by_id(donor)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let created = BloodRequest::submit(request, *donor, *hospital, self.clock.utc());
        self.requests
            .insert(&created)
            .await
            .map_err(map_request_error)?;
        info!(
            request_id = %created.id(),
            %hospital,
            %donor,
            blood_group = %group,
            units,
            priority = created.priority().as_str(),
            "blood request created"
        );

        self.notify(BloodRequestNotice {
            request_id: created.id(),
            hospital_name: target.hospital_name().to_owned(),
            hospital_email: target.email().to_string(),
            donor_name: requester.name().to_owned(),
            donor_email: requester.email().to_string(),
            patient_name: created.patient_name().to_owned(),
            blood_group: group,
            units_required: units,
            priority: created.priority(),
        })
        .await;

        Ok(created.id())
    }

    async fn update_status(
        &self,
        hospital: &HospitalId,
        request: &BloodRequestId,
        update: StatusUpdate,
    ) -> Result<BloodRequest, Error> {
        let mut current = self.require_request(request).await?;
        if current.hospital_id() != *hospital {
            return Err(Error::forbidden(NOT_AUTHORIZED));
        }
        let previous = current.status();
        current.respond(update.status, update.notes, self.clock.utc());
        self.requests
            .save_status(&current)
            .await
            .map_err(map_request_error)?;
        info!(
            request_id = %request,
            %hospital,
            from = %previous,
            to = %current.status(),
            "blood request status updated"
        );
        Ok(current)
    }

    async fn cancel(
        &self,
        donor: &DonorId,
        request: &BloodRequestId,
    ) -> Result<BloodRequest, Error> {
        let mut current = self.require_request(request).await?;
        if current.donor_id() != *donor {
            return Err(Error::forbidden(NOT_AUTHORIZED));
        }
        if !current.is_cancellable() {
            return Err(
                Error::invalid_request("Cannot cancel processed request").with_details(json!({
                    "field": "status",
                    "value": current.status(),
                    "code": "not_pending",
                })),
            );
        }
        current.cancel(self.clock.utc());
        self.requests
            .save_status(&current)
            .await
            .map_err(map_request_error)?;
        info!(request_id = %request, %donor, "blood request cancelled");
        Ok(current)
    }
}

#[async_trait]
impl<H, D, R> BloodRequestQuery for BloodRequestService<H, D, R>
where
    H: HospitalRepository,
    D: DonorRepository,
    R: BloodRequestRepository,
{
    async fn list_for_donor(&self, donor: &DonorId) -> Result<Vec<DonorRequestView>, Error> {
        self.requests
            .list_for_donor(donor)
            .await
            .map_err(map_request_error)
    }

    async fn list_for_hospital(&self, hospital: &HospitalId) -> Result<HospitalRequests, Error> {
        self.hospitals
            .find_by_id(hospital)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found(HOSPITAL_NOT_FOUND))?;
        let all = self
            .requests
            .list_for_hospital(hospital)
            .await
            .map_err(map_request_error)?;
        let total = all.len();
        let (pending_requests, rest): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|view| view.request.status() == RequestStatus::Pending);
        let approved_requests = rest
            .into_iter()
            .filter(|view| view.request.status() == RequestStatus::Approved)
            .collect();
        Ok(HospitalRequests {
            pending_requests,
            approved_requests,
            total,
        })
    }
}

#[cfg(test)]
#[path = "blood_request_service_tests.rs"]
mod tests;
