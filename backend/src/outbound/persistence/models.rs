//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blood_requests, donations, donors, hospital_reviews, hospitals};

// ---------------------------------------------------------------------------
// Donors
// ---------------------------------------------------------------------------

/// Row struct for reading donor profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: String,
    pub city: String,
    pub state: String,
    pub last_donation: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new donors.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donors)]
pub(crate) struct NewDonorRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub blood_group: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub last_donation: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Login material shared by the donor and hospital tables.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Row struct for donation history.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationRow {
    pub hospital_id: Option<Uuid>,
    pub units: i32,
    pub donated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Hospitals
// ---------------------------------------------------------------------------

/// Row struct for reading hospitals without their password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hospitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HospitalRow {
    pub id: Uuid,
    pub hospital_name: String,
    pub email: String,
    pub phone: String,
    pub registration_number: String,
    pub city: String,
    pub state: String,
    pub status: String,
    pub open_time: String,
    pub close_time: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    #[diesel(embed)]
    pub inventory: InventoryColumns,
    pub created_at: DateTime<Utc>,
}

/// The eight inventory counters, read and written as one unit.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = hospitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InventoryColumns {
    pub a_positive: i32,
    pub a_negative: i32,
    pub b_positive: i32,
    pub b_negative: i32,
    pub ab_positive: i32,
    pub ab_negative: i32,
    pub o_positive: i32,
    pub o_negative: i32,
}

/// Insertable struct for new hospitals.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hospitals)]
pub(crate) struct NewHospitalRow<'a> {
    pub id: Uuid,
    pub hospital_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub registration_number: &'a str,
    pub city: &'a str,
    pub city_key: String,
    pub state: &'a str,
    pub status: &'a str,
    pub open_time: &'a str,
    pub close_time: &'a str,
    pub emergency_contact_name: Option<&'a str>,
    pub emergency_contact_phone: Option<&'a str>,
    #[diesel(embed)]
    pub inventory: InventoryColumns,
    pub created_at: DateTime<Utc>,
}

/// Row struct for hospital reviews.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hospital_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub hospital_id: Uuid,
    pub user_name: String,
    pub rating: i16,
    pub comment: String,
    pub reviewed_at: DateTime<Utc>,
}

/// Insertable struct for new reviews.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hospital_reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub user_name: &'a str,
    pub rating: i16,
    pub comment: &'a str,
    pub reviewed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Blood requests
// ---------------------------------------------------------------------------

/// Row struct for reading blood requests.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blood_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BloodRequestRow {
    pub id: Uuid,
    pub patient_name: String,
    pub blood_group: String,
    pub units_required: i32,
    pub priority: String,
    pub status: String,
    pub donor_id: Uuid,
    pub hospital_id: Uuid,
    pub request_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub timeline: serde_json::Value,
}

/// Insertable struct for new blood requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blood_requests)]
pub(crate) struct NewBloodRequestRow<'a> {
    pub id: Uuid,
    pub patient_name: &'a str,
    pub blood_group: &'a str,
    pub units_required: i32,
    pub priority: &'a str,
    pub status: &'a str,
    pub donor_id: Uuid,
    pub hospital_id: Uuid,
    pub request_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub notes: Option<&'a str>,
    pub timeline: serde_json::Value,
}

/// Changeset for hospital decisions and donor cancellations.
///
/// `treat_none_as_null` so clearing notes persists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blood_requests)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BloodRequestStatusUpdate<'a> {
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub response_date: Option<DateTime<Utc>>,
    pub timeline: serde_json::Value,
}

/// Name and contact columns joined onto request listings.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct PartyRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}
