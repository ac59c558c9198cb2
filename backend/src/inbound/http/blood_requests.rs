//! Blood request handlers for donors.
//!
//! ```text
//! POST /api/blood-requests/{hospitalId}  {"patientName":"Meera","bloodGroup":"B+","unitsRequired":2}
//! GET  /api/blood-requests/my-requests
//! PUT  /api/blood-requests/cancel/{requestId}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{BloodRequestId, DonorRequestView, HospitalId, NewBloodRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::schemas::{DonorRequestViewSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_blood_request_error, missing_field_error, parse_blood_group, parse_id,
    parse_priority, parse_units, require,
};

/// Request body for a new blood request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBloodRequestBody {
    /// Name of the patient.
    pub patient_name: Option<String>,
    /// Requested blood group, such as `O+`.
    #[schema(example = "B+")]
    pub blood_group: Option<String>,
    /// Units requested; must be positive.
    #[schema(example = 2)]
    pub units_required: Option<i64>,
    /// `NORMAL`, `URGENT` or `EMERGENCY`; defaults to `NORMAL`.
    #[schema(example = "URGENT")]
    pub priority: Option<String>,
}

    /// Identifier of the new request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestCreatedResponse {
    /// Human-readable confirmation.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the new request.
    pub request_id: Uuid,
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn new_blood_request(body: CreateBloodRequestBody) -> ApiResult<NewBloodRequest> {
    let patient_name = require(body.patient_name, FieldName::new("patientName"))?;
    let blood_group_field = FieldName::new("bloodGroup");
    let blood_group = require(body.blood_group, blood_group_field)?;
    let blood_group = parse_blood_group(&blood_group, blood_group_field)?;
    let units_field = FieldName::new("unitsRequired");
    let units = body
        .units_required
        .ok_or_else(|| missing_field_error(units_field))?;
    let units = parse_units(units, units_field)?;
    let priority = body
        .priority
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_priority)
        .transpose()?;
    NewBloodRequest::new(patient_name, blood_group, units, priority)
        .map_err(map_blood_request_error)
}

/// Shared by both request-creation routes; only the success message differs.
pub(crate) async fn submit_request(
    state: &HttpState,
    auth: &AuthContext,
    hospital: &str,
    body: CreateBloodRequestBody,
    message: &str,
) -> ApiResult<HttpResponse> {
    let donor = auth.require_donor()?;
    let hospital: HospitalId = parse_id(hospital, FieldName::new("hospitalId"))?;
    let request = new_blood_request(body)?;
    let id = state.requests.create(&donor, &hospital, request).await?;
    Ok(HttpResponse::Created().json(RequestCreatedResponse {
        success: true,
        message: message.to_owned(),
        request_id: *id.as_uuid(),
    }))
}

/// Ask a hospital for units of one blood group.
#[utoipa::path(
    post,
    path = "/api/blood-requests/{hospitalId}",
    params(("hospitalId" = String, Path, description = "Target hospital")),
    request_body = CreateBloodRequestBody,
    responses(
        (status = 201, description = "Request created", body = RequestCreatedResponse),
        (status = 400, description = "Invalid request or insufficient units", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a donor account", body = ErrorSchema),
        (status = 404, description = "Hospital not found", body = ErrorSchema)
    ),
    tags = ["blood-requests"],
    operation_id = "createBloodRequest"
)]
#[post("/blood-requests/{hospitalId}")]
pub async fn create_request(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<CreateBloodRequestBody>,
) -> ApiResult<HttpResponse> {
    submit_request(
        &state,
        &auth,
        &path.into_inner(),
        payload.into_inner(),
        "Blood request created successfully",
    )
    .await
}

/// Requests the caller has made, newest first.
#[utoipa::path(
    get,
    path = "/api/blood-requests/my-requests",
    responses(
        (status = 200, description = "Donor requests", body = [DonorRequestViewSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a donor account", body = ErrorSchema)
    ),
    tags = ["blood-requests"],
    operation_id = "listMyRequests"
)]
#[get("/blood-requests/my-requests")]
pub async fn my_requests(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<Vec<DonorRequestView>>> {
    let donor = auth.require_donor()?;
    let requests = state.request_queries.list_for_donor(&donor).await?;
    Ok(web::Json(requests))
}

/// Withdraw a request that is still pending.
#[utoipa::path(
    put,
    path = "/api/blood-requests/cancel/{requestId}",
    params(("requestId" = String, Path, description = "Request to cancel")),
    responses(
        (status = 200, description = "Request cancelled", body = MessageResponse),
        (status = 400, description = "Request already processed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Request belongs to another donor", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema)
    ),
    tags = ["blood-requests"],
    operation_id = "cancelBloodRequest"
)]
#[put("/blood-requests/cancel/{requestId}")]
pub async fn cancel_request(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let donor = auth.require_donor()?;
    let request: BloodRequestId = parse_id(&path.into_inner(), FieldName::new("requestId"))?;
    state.requests.cancel(&donor, &request).await?;
    Ok(web::Json(MessageResponse {
        message: "Request cancelled successfully".to_owned(),
    }))
}
