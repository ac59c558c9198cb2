//! Hospital directory, self-service and review handlers.
//!
//! ```text
//! GET  /api/hospitals?city=Pune
//! GET  /api/hospitals/profile
//! GET  /api/hospitals/requests
//! PUT  /api/hospitals/inventory               {"oNegative":4,"aPositive":10}
//! PUT  /api/hospitals/requests/{requestId}    {"status":"APPROVED","notes":"Desk 3"}
//! GET  /api/hospitals/{id}
//! POST /api/hospitals/{id}/reviews            {"rating":5,"comment":"Quick"}
//! POST /api/hospitals/{hospitalId}/request-blood
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{HospitalListFilter, HospitalRequests, NewReview, StatusUpdate};
use crate::domain::{
    BloodRequest, BloodRequestId, Hospital, HospitalId, Inventory, InventoryPatch, Rating, Review,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::blood_requests::{
    CreateBloodRequestBody, RequestCreatedResponse, submit_request,
};
use crate::inbound::http::schemas::{
    BloodRequestSchema, ErrorSchema, HospitalRequestsSchema, HospitalSchema, InventorySchema,
    ReviewSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_inventory_error, map_review_error, missing_field_error, parse_id,
    parse_status, require,
};

/// Directory query string.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HospitalListQuery {
    /// Case-insensitive city name.
    pub city: Option<String>,
}

    /// Counters after the patch was merged.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryUpdatedResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Counters after the patch was merged.
    #[schema(value_type = InventorySchema)]
    pub inventory: Inventory,
}

/// Decision on a request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StatusUpdateBody {
    /// `PENDING`, `APPROVED`, `REJECTED`, `FULFILLED` or `CANCELLED`.
    #[schema(example = "APPROVED")]
    pub status: Option<String>,
    /// Optional note shown to the donor.
    pub notes: Option<String>,
}

    /// The updated request.
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestUpdatedResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The updated request.
    #[schema(value_type = BloodRequestSchema)]
    pub request: BloodRequest,
}

/// A new review.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ReviewBody {
    /// Free-text comment.
    #[schema(example = 5)]
    pub rating: Option<i64>,
    /// Free-text comment.
    pub comment: String,
}

    /// The stored review.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewAddedResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The stored review.
    #[schema(value_type = ReviewSchema)]
    pub review: Review,
}

fn hospital_path(raw: &str) -> ApiResult<HospitalId> {
    parse_id(raw, FieldName::new("id"))
}

/// List hospitals, optionally filtered by city.
#[utoipa::path(
    get,
    path = "/api/hospitals",
    params(HospitalListQuery),
    responses(
        (status = 200, description = "Hospitals", body = [HospitalSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "listHospitals",
    security([])
)]
#[get("/hospitals")]
pub async fn list_hospitals(
    state: web::Data<HttpState>,
    query: web::Query<HospitalListQuery>,
) -> ApiResult<web::Json<Vec<Hospital>>> {
    let filter = HospitalListFilter::city(query.city.as_deref());
    let hospitals = state.hospitals.list(&filter).await?;
    Ok(web::Json(hospitals))
}

/// The caller's own hospital record.
#[utoipa::path(
    get,
    path = "/api/hospitals/profile",
    responses(
        (status = 200, description = "Hospital profile", body = HospitalSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a hospital account", body = ErrorSchema),
        (status = 404, description = "Hospital not found", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "getHospitalProfile"
)]
#[get("/hospitals/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<Hospital>> {
    let hospital = auth.require_hospital()?;
    let profile = state.hospitals.profile(&hospital).await?;
    Ok(web::Json(profile))
}

/// Requests addressed to the caller, split by status.
#[utoipa::path(
    get,
    path = "/api/hospitals/requests",
    responses(
        (status = 200, description = "Incoming requests", body = HospitalRequestsSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a hospital account", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "listHospitalRequests"
)]
#[get("/hospitals/requests")]
pub async fn incoming_requests(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<HospitalRequests>> {
    let hospital = auth.require_hospital()?;
    let requests = state.request_queries.list_for_hospital(&hospital).await?;
    Ok(web::Json(requests))
}

/// Overwrite the listed blood-group counters; others are kept.
#[utoipa::path(
    put,
    path = "/api/hospitals/inventory",
    request_body = InventorySchema,
    responses(
        (status = 200, description = "Inventory updated", body = InventoryUpdatedResponse),
        (status = 400, description = "Unknown group or invalid count", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a hospital account", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "updateInventory"
)]
#[put("/hospitals/inventory")]
pub async fn update_inventory(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<BTreeMap<String, i64>>,
) -> ApiResult<web::Json<InventoryUpdatedResponse>> {
    let hospital = auth.require_hospital()?;
    let patch =
        InventoryPatch::try_from_entries(payload.into_inner()).map_err(map_inventory_error)?;
    let inventory = state
        .hospital_commands
        .update_inventory(&hospital, &patch)
        .await?;
    Ok(web::Json(InventoryUpdatedResponse {
        message: "Inventory updated successfully".to_owned(),
        inventory,
    }))
}

/// Record a decision on a request addressed to the caller.
#[utoipa::path(
    put,
    path = "/api/hospitals/requests/{requestId}",
    params(("requestId" = String, Path, description = "Request to update")),
    request_body = StatusUpdateBody,
    responses(
        (status = 200, description = "Request updated", body = RequestUpdatedResponse),
        (status = 400, description = "Invalid status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Request belongs to another hospital", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "updateRequestStatus"
)]
#[put("/hospitals/requests/{requestId}")]
pub async fn update_request_status(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateBody>,
) -> ApiResult<web::Json<RequestUpdatedResponse>> {
    let hospital = auth.require_hospital()?;
    let request: BloodRequestId = parse_id(&path.into_inner(), FieldName::new("requestId"))?;
    let StatusUpdateBody { status, notes } = payload.into_inner();
    let status = parse_status(&require(status, FieldName::new("status"))?)?;
    let update = StatusUpdate { status, notes };
    let request = state
        .requests
        .update_status(&hospital, &request, update)
        .await?;
    Ok(web::Json(RequestUpdatedResponse {
        message: "Request updated successfully".to_owned(),
        request,
    }))
}

/// A single hospital by id.
#[utoipa::path(
    get,
    path = "/api/hospitals/{id}",
    params(("id" = String, Path, description = "Hospital identifier")),
    responses(
        (status = 200, description = "Hospital", body = HospitalSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Hospital not found", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "getHospital",
    security([])
)]
#[get("/hospitals/{id}")]
pub async fn get_hospital(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Hospital>> {
    let id = hospital_path(&path.into_inner())?;
    let hospital = state.hospitals.get(&id).await?;
    Ok(web::Json(hospital))
}

/// Review a hospital. The reviewer name is taken from the token.
#[utoipa::path(
    post,
    path = "/api/hospitals/{id}/reviews",
    params(("id" = String, Path, description = "Hospital identifier")),
    request_body = ReviewBody,
    responses(
        (status = 201, description = "Review added", body = ReviewAddedResponse),
        (status = 400, description = "Rating out of range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Hospital not found", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "addReview"
)]
#[post("/hospitals/{id}/reviews")]
pub async fn add_review(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<ReviewBody>,
) -> ApiResult<HttpResponse> {
    let hospital = hospital_path(&path.into_inner())?;
    let ReviewBody { rating, comment } = payload.into_inner();
    let rating = rating.ok_or_else(|| missing_field_error(FieldName::new("rating")))?;
    let review = NewReview {
        reviewer_name: auth.principal().name().to_owned(),
        rating: Rating::new(rating).map_err(map_review_error)?,
        comment,
    };
    let review = state
        .hospital_commands
        .add_review(&hospital, review)
        .await?;
    Ok(HttpResponse::Created().json(ReviewAddedResponse {
        message: "Review added successfully".to_owned(),
        review,
    }))
}

/// Ask this hospital for blood; same contract as `POST /api/blood-requests/{hospitalId}`.
#[utoipa::path(
    post,
    path = "/api/hospitals/{hospitalId}/request-blood",
    params(("hospitalId" = String, Path, description = "Target hospital")),
    request_body = CreateBloodRequestBody,
    responses(
        (status = 201, description = "Request sent", body = RequestCreatedResponse),
        (status = 400, description = "Invalid request or insufficient units", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not a donor account", body = ErrorSchema),
        (status = 404, description = "Hospital not found", body = ErrorSchema)
    ),
    tags = ["hospitals"],
    operation_id = "requestBloodFromHospital"
)]
#[post("/hospitals/{hospitalId}/request-blood")]
pub async fn request_blood(
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
        "Blood request sent successfully",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BloodGroup, DonorId, Error, Principal, RequestStatus};
    use crate::inbound::http::test_utils::{
        TestPorts, bearer, sample_hospital, sample_request, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn hospital_ports(hospital: HospitalId) -> TestPorts {
        TestPorts::authenticated_as(Principal::hospital(
            hospital,
            "City General",
            "desk@citygeneral.org",
        ))
    }

    #[rstest]
    #[case("/api/hospitals?city=pune", Some("pune"))]
    #[case("/api/hospitals?city=", None)]
    #[case("/api/hospitals", None)]
    #[actix_web::test]
    async fn list_passes_city_filter(#[case] uri: &str, #[case] city: Option<&'static str>) {
        let mut ports = TestPorts::default();
        ports
            .hospitals
            .expect_list()
            .withf(move |filter| filter.city.as_deref() == city)
            .times(1)
            .return_once(|_| Ok(vec![sample_hospital(HospitalId::random(), Inventory::default())]));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.pointer("/0/hospitalName"), Some(&json!("City General")));
    }

    #[rstest]
    #[actix_web::test]
    async fn profile_route_wins_over_id_route() {
        let id = HospitalId::random();
        let mut ports = hospital_ports(id);
        ports.hospitals.expect_get().never();
        ports
            .hospitals
            .expect_profile()
            .withf(move |h| *h == id)
            .return_once(move |_| Ok(sample_hospital(id, Inventory::default())));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/hospitals/profile")
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn donor_token_cannot_read_incoming_requests() {
        let mut ports =
            TestPorts::authenticated_as(Principal::donor(DonorId::random(), "Asha", "a@b.org"));
        ports.request_queries.expect_list_for_hospital().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/hospitals/requests")
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn incoming_requests_are_grouped() {
        let id = HospitalId::random();
        let mut ports = hospital_ports(id);
        ports
            .request_queries
            .expect_list_for_hospital()
            .return_once(|_| {
                Ok(HospitalRequests {
                    pending_requests: Vec::new(),
                    approved_requests: Vec::new(),
                    total: 3,
                })
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/hospitals/requests")
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({"pendingRequests": [], "approvedRequests": [], "total": 3})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn inventory_update_returns_merged_counters() {
        let id = HospitalId::random();
        let mut ports = hospital_ports(id);
        ports
            .hospital_commands
            .expect_update_inventory()
            .withf(|_, patch| patch.get(BloodGroup::ONegative) == Some(4))
            .return_once(|_, _| {
                Ok(Inventory::default()
                    .with_units(BloodGroup::ONegative, 4)
                    .with_units(BloodGroup::APositive, 9))
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/hospitals/inventory")
            .insert_header(bearer())
            .set_json(json!({"oNegative": 4}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("message"), Some(&json!("Inventory updated successfully")));
        assert_eq!(body.pointer("/inventory/aPositive"), Some(&json!(9)));
        assert_eq!(body.pointer("/inventory/oNegative"), Some(&json!(4)));
    }

    #[rstest]
    #[case(json!({"zPositive": 1}))]
    #[case(json!({"aPositive": -3}))]
    #[actix_web::test]
    async fn inventory_update_rejects_bad_entries(#[case] body: Value) {
        let mut ports = hospital_ports(HospitalId::random());
        ports.hospital_commands.expect_update_inventory().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/hospitals/inventory")
            .insert_header(bearer())
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn status_update_returns_the_request() {
        let hospital = HospitalId::random();
        let mut ports = hospital_ports(hospital);
        ports
            .requests
            .expect_update_status()
            .withf(|_, _, update| {
                update.status == RequestStatus::Approved && update.notes.as_deref() == Some("Desk 3")
            })
            .return_once(move |_, _, update| {
                let mut request = sample_request(DonorId::random(), hospital);
                request.respond(update.status, update.notes, Utc::now());
                Ok(request)
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/hospitals/requests/{}", BloodRequestId::random()))
            .insert_header(bearer())
            .set_json(json!({"status": "approved", "notes": "Desk 3"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("message"), Some(&json!("Request updated successfully")));
        assert_eq!(body.pointer("/request/status"), Some(&json!("APPROVED")));
        assert_eq!(
            body.pointer("/request/timeline").and_then(Value::as_array).map(Vec::len),
            Some(2)
        );
    }

    #[rstest]
    #[case(json!({}), "missing_field")]
    #[case(json!({"status": "SHIPPED"}), "invalid_status")]
    #[actix_web::test]
    async fn status_update_validates_status(#[case] body: Value, #[case] code: &str) {
        let mut ports = hospital_ports(HospitalId::random());
        ports.requests.expect_update_status().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/hospitals/requests/{}", BloodRequestId::random()))
            .insert_header(bearer())
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Error = actix_test::read_body_json(response).await;
        assert_eq!(error.details().and_then(|d| d.get("code")), Some(&json!(code)));
    }

    #[rstest]
    #[actix_web::test]
    async fn status_update_for_foreign_request_is_forbidden() {
        let mut ports = hospital_ports(HospitalId::random());
        ports
            .requests
            .expect_update_status()
            .return_once(|_, _, _| Err(Error::forbidden("Access denied")));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/hospitals/requests/{}", BloodRequestId::random()))
            .insert_header(bearer())
            .set_json(json!({"status": "REJECTED"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case("not-a-uuid", StatusCode::BAD_REQUEST)]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn get_hospital_reports_bad_or_unknown_ids(
        #[case] raw: &str,
        #[case] status: StatusCode,
    ) {
        let mut ports = TestPorts::default();
        ports
            .hospitals
            .expect_get()
            .returning(|_| Err(Error::not_found("Hospital not found")));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/hospitals/{raw}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn review_uses_the_token_name() {
        let hospital = HospitalId::random();
        let mut ports =
            TestPorts::authenticated_as(Principal::donor(DonorId::random(), "Asha", "a@b.org"));
        ports
            .hospital_commands
            .expect_add_review()
            .withf(move |h, review| *h == hospital && review.reviewer_name == "Asha")
            .return_once(|_, review| {
                Ok(Review::new(review.reviewer_name, review.rating, review.comment, Utc::now())
                    .expect("valid review"))
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/hospitals/{hospital}/reviews"))
            .insert_header(bearer())
            .set_json(json!({"rating": 4, "comment": "Quick", "userName": "Spoofed"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.pointer("/review/userName"), Some(&json!("Asha")));
        assert_eq!(body.pointer("/review/rating"), Some(&json!(4)));
    }

    #[rstest]
    #[case(json!({"rating": 0}))]
    #[case(json!({"rating": 6}))]
    #[case(json!({"comment": "no rating"}))]
    #[actix_web::test]
    async fn review_rating_must_be_in_range(#[case] body: Value) {
        let mut ports =
            TestPorts::authenticated_as(Principal::donor(DonorId::random(), "Asha", "a@b.org"));
        ports.hospital_commands.expect_add_review().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/hospitals/{}/reviews", HospitalId::random()))
            .insert_header(bearer())
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn request_blood_uses_its_own_message() {
        let hospital = HospitalId::random();
        let created = BloodRequestId::random();
        let mut ports =
            TestPorts::authenticated_as(Principal::donor(DonorId::random(), "Asha", "a@b.org"));
        ports
            .requests
            .expect_create()
            .withf(move |_, h, _| *h == hospital)
            .return_once(move |_, _, _| Ok(created));
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/hospitals/{hospital}/request-blood"))
            .insert_header(bearer())
            .set_json(json!({"patientName": "Meera", "bloodGroup": "O-", "unitsRequired": 1}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("message"), Some(&json!("Blood request sent successfully")));
        assert_eq!(body.get("requestId"), Some(&json!(created.to_string())));
    }
}
