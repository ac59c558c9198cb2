//! PostgreSQL-backed `BloodRequestRepository` implementation using Diesel ORM.
//!
//! The timeline is stored as a JSONB array on the request row and rewritten
//! whole on every status change.

use std::fmt::Display;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BloodRequestRepository, BloodRequestRepositoryError};
use crate::domain::{
    BloodRequest, BloodRequestDraft, BloodRequestId, DonorId, DonorRequestView, HospitalId,
    HospitalRequestView, PartySummary, TimelineEntry,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BloodRequestRow, BloodRequestStatusUpdate, NewBloodRequestRow, PartyRow};
use super::pool::{DbPool, PoolError};
use super::schema::{blood_requests, donors, hospitals};

/// Diesel-backed implementation of the [`BloodRequestRepository`] port.
#[derive(Clone)]
pub struct DieselBloodRequestRepository {
    pool: DbPool,
}

impl DieselBloodRequestRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BloodRequestRepositoryError {
    map_pool_error(error, BloodRequestRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BloodRequestRepositoryError {
    map_diesel_error(
        error,
        BloodRequestRepositoryError::query,
        BloodRequestRepositoryError::connection,
    )
}

fn corrupt(field: &str, error: impl Display) -> BloodRequestRepositoryError {
    BloodRequestRepositoryError::query(format!("stored blood request {field} is invalid: {error}"))
}

fn timeline_to_json(
    timeline: &[TimelineEntry],
) -> Result<serde_json::Value, BloodRequestRepositoryError> {
    serde_json::to_value(timeline).map_err(|err| {
        BloodRequestRepositoryError::query(format!("failed to serialise timeline: {err}"))
    })
}

fn row_to_request(row: BloodRequestRow) -> Result<BloodRequest, BloodRequestRepositoryError> {
    Ok(BloodRequest::from(BloodRequestDraft {
        id: BloodRequestId::from_uuid(row.id),
        patient_name: row.patient_name,
        blood_group: row
            .blood_group
            .parse()
            .map_err(|err| corrupt("blood group", err))?,
        units_required: u32::try_from(row.units_required)
            .map_err(|err| corrupt("units required", err))?,
        priority: row.priority.parse().map_err(|err| corrupt("priority", err))?,
        status: row.status.parse().map_err(|err| corrupt("status", err))?,
        donor_id: DonorId::from_uuid(row.donor_id),
        hospital_id: HospitalId::from_uuid(row.hospital_id),
        request_date: row.request_date,
        response_date: row.response_date,
        notes: row.notes,
        timeline: serde_json::from_value(row.timeline)
            .map_err(|err| corrupt("timeline", err))?,
    }))
}

fn party(row: PartyRow) -> PartySummary {
    PartySummary {
        id: row.id,
        name: row.name,
        email: row.email,
        phone: row.phone,
    }
}

#[async_trait]
impl BloodRequestRepository for DieselBloodRequestRepository {
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewBloodRequestRow {
            id: *request.id().as_uuid(),
            patient_name: request.patient_name(),
            blood_group: request.blood_group().as_str(),
            units_required: i32::try_from(request.units_required())
                .map_err(|err| corrupt("units required", err))?,
            priority: request.priority().as_str(),
            status: request.status().as_str(),
            donor_id: *request.donor_id().as_uuid(),
            hospital_id: *request.hospital_id().as_uuid(),
            request_date: request.request_date(),
            response_date: request.response_date(),
            notes: request.notes(),
            timeline: timeline_to_json(request.timeline())?,
        };

        diesel::insert_into(blood_requests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &BloodRequestId,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<BloodRequestRow> = blood_requests::table
            .find(*id.as_uuid())
            .select(BloodRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_request).transpose()
    }

    async fn list_for_donor(
        &self,
        donor: &DonorId,
    ) -> Result<Vec<DonorRequestView>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<(BloodRequestRow, PartyRow)> = blood_requests::table
            .inner_join(hospitals::table)
            .filter(blood_requests::donor_id.eq(*donor.as_uuid()))
            .order((blood_requests::request_date.desc(), blood_requests::id.asc()))
            .select((
                BloodRequestRow::as_select(),
                (
                    hospitals::id,
                    hospitals::hospital_name,
                    hospitals::email,
                    hospitals::phone,
                ),
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(request, hospital)| {
                Ok(DonorRequestView {
                    request: row_to_request(request)?,
                    hospital: party(hospital),
                })
            })
            .collect()
    }

    async fn list_for_hospital(
        &self,
        hospital: &HospitalId,
    ) -> Result<Vec<HospitalRequestView>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<(BloodRequestRow, PartyRow)> = blood_requests::table
            .inner_join(donors::table)
            .filter(blood_requests::hospital_id.eq(*hospital.as_uuid()))
            .order((blood_requests::request_date.desc(), blood_requests::id.asc()))
            .select((
                BloodRequestRow::as_select(),
                (donors::id, donors::name, donors::email, donors::phone),
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(request, donor)| {
                Ok(HospitalRequestView {
                    request: row_to_request(request)?,
                    donor: party(donor),
                })
            })
            .collect()
    }

    async fn save_status(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let update = BloodRequestStatusUpdate {
            status: request.status().as_str(),
            notes: request.notes(),
            response_date: request.response_date(),
            timeline: timeline_to_json(request.timeline())?,
        };

        let updated = diesel::update(blood_requests::table.find(*request.id().as_uuid()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(BloodRequestRepositoryError::query(format!(
                "blood request {} not found for status update",
                request.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestStatus;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use uuid::Uuid;

    #[fixture]
    fn row() -> BloodRequestRow {
        let now = Utc::now();
        BloodRequestRow {
            id: Uuid::new_v4(),
            patient_name: "Meera".to_owned(),
            blood_group: "B-".to_owned(),
            units_required: 2,
            priority: "EMERGENCY".to_owned(),
            status: "APPROVED".to_owned(),
            donor_id: Uuid::new_v4(),
            hospital_id: Uuid::new_v4(),
            request_date: now,
            response_date: Some(now),
            notes: Some("Collect from desk 3".to_owned()),
            timeline: json!([
                {"status": "PENDING", "date": now, "notes": "Request submitted"},
                {"status": "APPROVED", "date": now},
            ]),
        }
    }

    #[rstest]
    fn converts_row_with_timeline(row: BloodRequestRow) {
        let request = row_to_request(row).expect("valid row");
        assert_eq!(request.status(), RequestStatus::Approved);
        assert_eq!(request.timeline().len(), 2);
        let first_note = request
            .timeline()
            .first()
            .and_then(|entry| entry.notes.as_deref());
        assert_eq!(first_note, Some("Request submitted"));
    }

    #[rstest]
    #[case("status", "DONE")]
    #[case("priority", "LOW")]
    fn rejects_unknown_enumerations(
        mut row: BloodRequestRow,
        #[case] field: &str,
        #[case] value: &str,
    ) {
        match field {
            "status" => row.status = value.to_owned(),
            _ => row.priority = value.to_owned(),
        }
        let error = row_to_request(row).expect_err("unknown value");
        assert!(error.to_string().contains(field));
    }

    #[rstest]
    fn timeline_serialises_as_array(row: BloodRequestRow) {
        let request = row_to_request(row).expect("valid row");
        let value = timeline_to_json(request.timeline()).expect("serialise");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
