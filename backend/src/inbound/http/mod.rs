//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
pub mod blood_requests;
pub mod donors;
pub mod error;
pub mod health;
pub mod hospitals;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod validation;

pub use error::{ApiResult, json_config};

use actix_web::web;

/// Register every `/api` handler.
///
/// Literal hospital paths (`/hospitals/profile`, `/hospitals/requests`,
/// `/hospitals/inventory`) are registered before `/hospitals/{id}`.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register_donor)
        .service(accounts::register_hospital)
        .service(accounts::login)
        .service(donors::profile)
        .service(donors::blood_requests)
        .service(hospitals::list_hospitals)
        .service(hospitals::own_profile)
        .service(hospitals::incoming_requests)
        .service(hospitals::update_inventory)
        .service(hospitals::update_request_status)
        .service(hospitals::get_hospital)
        .service(hospitals::add_review)
        .service(hospitals::request_blood)
        .service(blood_requests::my_requests)
        .service(blood_requests::create_request)
        .service(blood_requests::cancel_request);
}
