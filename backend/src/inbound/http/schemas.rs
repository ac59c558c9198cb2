//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their serialised JSON shape for utoipa; flattened
//! views repeat the request fields because the wire format is flat.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The resource already exists, such as a registered email.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: patientName")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field and code of a validation failure.
    details: Option<serde_json::Value>,
}

/// City and state.
#[derive(ToSchema)]
#[schema(as = Location)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LocationSchema {
    #[schema(example = "Pune")]
    city: String,
    #[schema(example = "Maharashtra")]
    state: String,
}

/// Units held per blood group. Every counter defaults to zero.
#[derive(ToSchema)]
#[schema(as = Inventory, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InventorySchema {
    a_positive: u32,
    a_negative: u32,
    b_positive: u32,
    b_negative: u32,
    ab_positive: u32,
    ab_negative: u32,
    o_positive: u32,
    o_negative: u32,
}

/// A patient review of a hospital.
#[derive(ToSchema)]
#[schema(as = Review, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    user_name: String,
    #[schema(minimum = 1, maximum = 5)]
    rating: u8,
    comment: String,
    date: chrono::DateTime<chrono::Utc>,
}

/// Daily opening and closing times.
#[derive(ToSchema)]
#[schema(as = OperatingHours)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OperatingHoursSchema {
    #[schema(example = "09:00")]
    open: String,
    #[schema(example = "18:00")]
    close: String,
}

/// Emergency contact of a hospital.
#[derive(ToSchema)]
#[schema(as = EmergencyContact)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmergencyContactSchema {
    name: String,
    phone: String,
}

/// Public hospital record. Reviews are newest first.
#[derive(ToSchema)]
#[schema(as = Hospital, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HospitalSchema {
    id: uuid::Uuid,
    hospital_name: String,
    email: String,
    phone: String,
    registration_number: String,
    location: LocationSchema,
    inventory: InventorySchema,
    #[schema(example = "ACTIVE")]
    status: String,
    operating_hours: OperatingHoursSchema,
    emergency_contact: Option<EmergencyContactSchema>,
    reviews: Vec<ReviewSchema>,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// One recorded donation.
#[derive(ToSchema)]
#[schema(as = Donation, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DonationSchema {
    date: chrono::DateTime<chrono::Utc>,
    hospital_id: Option<uuid::Uuid>,
    units: u32,
}

/// Donor record with eligibility evaluated at read time.
#[derive(ToSchema)]
#[schema(as = DonorProfile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DonorProfileSchema {
    id: uuid::Uuid,
    name: String,
    email: String,
    phone: String,
    #[schema(example = "O+")]
    blood_group: String,
    location: LocationSchema,
    last_donation: Option<chrono::DateTime<chrono::Utc>>,
    donation_history: Vec<DonationSchema>,
    created_at: chrono::DateTime<chrono::Utc>,
    eligible_to_donate: bool,
}

/// One status change of a request.
#[derive(ToSchema)]
#[schema(as = TimelineEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TimelineEntrySchema {
    #[schema(example = "PENDING")]
    status: String,
    date: chrono::DateTime<chrono::Utc>,
    notes: Option<String>,
}

/// A blood request.
#[derive(ToSchema)]
#[schema(as = BloodRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BloodRequestSchema {
    id: uuid::Uuid,
    patient_name: String,
    #[schema(example = "B+")]
    blood_group: String,
    units_required: u32,
    #[schema(example = "NORMAL")]
    priority: String,
    #[schema(example = "PENDING")]
    status: String,
    donor_id: uuid::Uuid,
    hospital_id: uuid::Uuid,
    request_date: chrono::DateTime<chrono::Utc>,
    response_date: Option<chrono::DateTime<chrono::Utc>>,
    notes: Option<String>,
    timeline: Vec<TimelineEntrySchema>,
}

/// Contact details of the other party on a request.
#[derive(ToSchema)]
#[schema(as = PartySummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PartySummarySchema {
    id: uuid::Uuid,
    name: String,
    email: String,
    phone: String,
}

/// A request with the hospital's contact details.
#[derive(ToSchema)]
#[schema(as = DonorRequestView, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DonorRequestViewSchema {
    id: uuid::Uuid,
    patient_name: String,
    blood_group: String,
    units_required: u32,
    priority: String,
    status: String,
    donor_id: uuid::Uuid,
    hospital_id: uuid::Uuid,
    request_date: chrono::DateTime<chrono::Utc>,
    response_date: Option<chrono::DateTime<chrono::Utc>>,
    notes: Option<String>,
    timeline: Vec<TimelineEntrySchema>,
    hospital: PartySummarySchema,
}

/// A request with the donor's contact details.
#[derive(ToSchema)]
#[schema(as = HospitalRequestView, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HospitalRequestViewSchema {
    id: uuid::Uuid,
    patient_name: String,
    blood_group: String,
    units_required: u32,
    priority: String,
    status: String,
    donor_id: uuid::Uuid,
    hospital_id: uuid::Uuid,
    request_date: chrono::DateTime<chrono::Utc>,
    response_date: Option<chrono::DateTime<chrono::Utc>>,
    notes: Option<String>,
    timeline: Vec<TimelineEntrySchema>,
    donor: PartySummarySchema,
}

/// Incoming requests. `total` counts every status.
#[derive(ToSchema)]
#[schema(as = HospitalRequests, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HospitalRequestsSchema {
    pending_requests: Vec<HospitalRequestViewSchema>,
    approved_requests: Vec<HospitalRequestViewSchema>,
    total: usize,
}
