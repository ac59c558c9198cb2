//! Donor self-service handlers.
//!
//! ```text
//! GET /api/users/profile
//! GET /api/users/blood-requests
//! ```

use actix_web::{get, web};

use crate::domain::{DonorProfile, DonorRequestView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::schemas::{DonorProfileSchema, DonorRequestViewSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// The caller's donor profile with current donation eligibility.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Donor profile", body = DonorProfileSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a donor account", body = ErrorSchema),
        (status = 404, description = "Donor not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getDonorProfile"
)]
#[get("/users/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<DonorProfile>> {
    let donor = auth.require_donor()?;
    let profile = state.donors.profile(&donor).await?;
    Ok(web::Json(profile))
}

/// Requests the caller has made, newest first.
#[utoipa::path(
    get,
    path = "/api/users/blood-requests",
    responses(
        (status = 200, description = "Donor requests", body = [DonorRequestViewSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a donor account", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listDonorRequests"
)]
#[get("/users/blood-requests")]
pub async fn blood_requests(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<Vec<DonorRequestView>>> {
    let donor = auth.require_donor()?;
    let requests = state.donors.requests(&donor).await?;
    Ok(web::Json(requests))
}
