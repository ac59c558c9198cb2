//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler plus the health probes, the
//! schema wrappers from [`crate::inbound::http::schemas`], and the bearer
//! token scheme. Swagger UI serves it in debug builds; `openapi-dump`
//! prints it for external tooling.

use crate::inbound::http::accounts::{
    CreatedResponse, EmergencyContactBody, LocationBody, LoginRequest, LoginResponse,
    OperatingHoursBody, RegisterDonorRequest, RegisterHospitalRequest,
};
use crate::inbound::http::blood_requests::{
    CreateBloodRequestBody, MessageResponse, RequestCreatedResponse,
};
use crate::inbound::http::hospitals::{
    InventoryUpdatedResponse, RequestUpdatedResponse, ReviewAddedResponse, ReviewBody,
    StatusUpdateBody,
};
use crate::inbound::http::schemas::{
    BloodRequestSchema, DonationSchema, DonorProfileSchema, DonorRequestViewSchema,
    EmergencyContactSchema, ErrorCodeSchema, ErrorSchema, HospitalRequestViewSchema,
    HospitalRequestsSchema, HospitalSchema, InventorySchema, LocationSchema, OperatingHoursSchema,
    PartySummarySchema, ReviewSchema, TimelineEntrySchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blood bank API",
        description = "Donor and hospital accounts, hospital inventory and blood requests.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register_donor,
        crate::inbound::http::accounts::register_hospital,
        crate::inbound::http::accounts::login,
        crate::inbound::http::donors::profile,
        crate::inbound::http::donors::blood_requests,
        crate::inbound::http::hospitals::list_hospitals,
        crate::inbound::http::hospitals::own_profile,
        crate::inbound::http::hospitals::incoming_requests,
        crate::inbound::http::hospitals::update_inventory,
        crate::inbound::http::hospitals::update_request_status,
        crate::inbound::http::hospitals::get_hospital,
        crate::inbound::http::hospitals::add_review,
        crate::inbound::http::hospitals::request_blood,
        crate::inbound::http::blood_requests::create_request,
        crate::inbound::http::blood_requests::my_requests,
        crate::inbound::http::blood_requests::cancel_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LocationSchema,
        InventorySchema,
        ReviewSchema,
        OperatingHoursSchema,
        EmergencyContactSchema,
        HospitalSchema,
        DonationSchema,
        DonorProfileSchema,
        TimelineEntrySchema,
        BloodRequestSchema,
        PartySummarySchema,
        DonorRequestViewSchema,
        HospitalRequestViewSchema,
        HospitalRequestsSchema,
        LocationBody,
        OperatingHoursBody,
        EmergencyContactBody,
        RegisterDonorRequest,
        RegisterHospitalRequest,
        LoginRequest,
        LoginResponse,
        CreatedResponse,
        CreateBloodRequestBody,
        RequestCreatedResponse,
        MessageResponse,
        StatusUpdateBody,
        ReviewBody,
        InventoryUpdatedResponse,
        RequestUpdatedResponse,
        ReviewAddedResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Donor self-service"),
        (name = "hospitals", description = "Hospital directory, inventory and reviews"),
        (name = "blood-requests", description = "Donor blood requests"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
