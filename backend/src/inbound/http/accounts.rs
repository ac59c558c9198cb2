//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register/user      {"name":"Asha","email":"asha@example.org",...}
//! POST /api/auth/register/hospital  {"hospitalName":"City General",...}
//! POST /api/auth/login              {"email":"asha@example.org","password":"...","userType":"user"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::LoginSession;
use crate::domain::{
    AccountKind, DonorRegistration, DonorRegistrationFields, HospitalRegistration,
    HospitalRegistrationFields, LoginCredentials,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_login_error, map_registration_error, missing_field_error,
};

/// City and state of an account.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LocationBody {
    /// City name.
    pub city: String,
    /// State or region.
    pub state: String,
}

/// Donor signup body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterDonorRequest {
    /// Full name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone, digits only.
    pub phone: String,
    /// Password of at least six characters.
    pub password: String,
    /// Donor blood group.
    #[schema(example = "O+")]
    pub blood_group: String,
    /// Home city and state.
    pub location: LocationBody,
}

/// Opening and closing time, `HH:MM`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct OperatingHoursBody {
    /// Opening time as `HH:MM`.
    pub open: Option<String>,
    /// Closing time as `HH:MM`.
    pub close: Option<String>,
}

    /// Contact phone, digits only.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct EmergencyContactBody {
    /// Contact name.
    pub name: String,
    /// Contact phone, digits only.
    pub phone: String,
}

/// Hospital signup body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterHospitalRequest {
    /// Display name of the hospital.
    pub hospital_name: String,
    /// Login email.
    pub email: String,
    /// Front desk phone, digits only.
    pub phone: String,
    /// Password of at least six characters.
    pub password: String,
    /// Official registration number.
    pub registration_number: String,
    /// City and state.
    pub location: LocationBody,
    /// Opening hours; defaults apply when absent.
    pub operating_hours: Option<OperatingHoursBody>,
    /// Optional emergency contact.
    pub emergency_contact: Option<EmergencyContactBody>,
}

/// Login body. `userType` is `user` or `hospital`; `donor` is accepted for `user`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Account password.
    pub password: String,
    #[schema(value_type = Option<String>, example = "user")]
    pub user_type: Option<AccountKind>,
}

/// Identifier of a newly created account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Identifier of the new account.
    pub id: Uuid,
}

/// Issued bearer token and the account it identifies.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    #[schema(value_type = String, example = "user")]
    pub user_type: AccountKind,
    /// Account identifier.
    pub id: Uuid,
    /// Display name of the account.
    pub name: String,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token,
            user_type: session.kind,
            id: session.id,
            name: session.name,
        }
    }
}

fn donor_registration(body: &RegisterDonorRequest) -> ApiResult<DonorRegistration> {
    DonorRegistration::try_from_fields(DonorRegistrationFields {
        name: &body.name,
        email: &body.email,
        phone: &body.phone,
        password: &body.password,
        blood_group: &body.blood_group,
        city: &body.location.city,
        state: &body.location.state,
    })
    .map_err(map_registration_error)
}

fn hospital_registration(body: &RegisterHospitalRequest) -> ApiResult<HospitalRegistration> {
    let hours = body.operating_hours.as_ref();
    HospitalRegistration::try_from_fields(HospitalRegistrationFields {
        hospital_name: &body.hospital_name,
        email: &body.email,
        phone: &body.phone,
        password: &body.password,
        registration_number: &body.registration_number,
        city: &body.location.city,
        state: &body.location.state,
        open: hours.and_then(|h| h.open.as_deref()),
        close: hours.and_then(|h| h.close.as_deref()),
        emergency_contact: body
            .emergency_contact
            .as_ref()
            .map(|contact| (contact.name.as_str(), contact.phone.as_str())),
    })
    .map_err(map_registration_error)
}

/// Register a donor account.
#[utoipa::path(
    post,
    path = "/api/auth/register/user",
    request_body = RegisterDonorRequest,
    responses(
        (status = 201, description = "Donor registered", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "registerDonor",
    security([])
)]
#[post("/auth/register/user")]
pub async fn register_donor(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterDonorRequest>,
) -> ApiResult<HttpResponse> {
    let registration = donor_registration(&payload)?;
    let id = state.accounts.register_donor(registration).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id: *id.as_uuid() }))
}

/// Register a hospital account.
#[utoipa::path(
    post,
    path = "/api/auth/register/hospital",
    request_body = RegisterHospitalRequest,
    responses(
        (status = 201, description = "Hospital registered", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "registerHospital",
    security([])
)]
#[post("/auth/register/hospital")]
pub async fn register_hospital(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterHospitalRequest>,
) -> ApiResult<HttpResponse> {
    let registration = hospital_registration(&payload)?;
    let id = state.accounts.register_hospital(registration).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id: *id.as_uuid() }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest {
        email,
        password,
        user_type,
    } = payload.into_inner();
    let kind = user_type.ok_or_else(|| missing_field_error(FieldName::new("userType")))?;
    let credentials =
        LoginCredentials::try_from_parts(&email, &password, kind).map_err(map_login_error)?;
    let session = state.accounts.login(&credentials).await?;
    Ok(web::Json(LoginResponse::from(session)))
}
