//! End-to-end registration and login over the HTTP adapter.

mod support;

use actix_web::http::Method;
use rstest::rstest;
use serde_json::json;

use support::{
    PASSWORD, call_json, donor_registration, hospital_registration, init_app, login, register,
};

#[actix_web::test]
async fn registered_donor_can_log_in_and_read_profile() {
    let app = init_app().await;
    let id = register(&app, "/api/auth/register/user", donor_registration("asha@example.com")).await;

    let (status, session) = call_json(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "asha@example.com", "password": PASSWORD, "userType": "user" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(session["userType"], "user");
    assert_eq!(session["id"], id.as_str());
    assert_eq!(session["name"], "Asha Rao");

    let token = session["token"].as_str().expect("token");
    let (status, profile) =
        call_json(&app, Method::GET, "/api/users/profile", Some(token), None).await;
    assert_eq!(status, 200);
    assert_eq!(profile["email"], "asha@example.com");
    assert_eq!(profile["bloodGroup"], "O+");
    assert_eq!(profile["eligibleToDonate"], true);
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = init_app().await;
    register(&app, "/api/auth/register/user", donor_registration("asha@example.com")).await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/api/auth/register/user",
        None,
        Some(donor_registration("asha@example.com")),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case::wrong_password("asha@example.com", "not-the-password")]
#[case::unknown_email("nobody@example.com", PASSWORD)]
#[actix_web::test]
async fn bad_credentials_are_rejected_alike(#[case] email: &str, #[case] password: &str) {
    let app = init_app().await;
    register(&app, "/api/auth/register/user", donor_registration("asha@example.com")).await;

    let (status, body) = call_json(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password, "userType": "donor" })),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_web::test]
async fn login_only_searches_the_requested_account_kind() {
    let app = init_app().await;
    register(
        &app,
        "/api/auth/register/hospital",
        hospital_registration("desk@citygeneral.example", "City General", "Pune"),
    )
    .await;

    let (status, _) = call_json(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({
            "email": "desk@citygeneral.example",
            "password": PASSWORD,
            "userType": "donor"
        })),
    )
    .await;
    assert_eq!(status, 401);

    let token = login(&app, "desk@citygeneral.example", "hospital").await;
    let (status, profile) =
        call_json(&app, Method::GET, "/api/hospitals/profile", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(profile["hospitalName"], "City General");
    assert_eq!(profile["status"], "ACTIVE");
}

#[actix_web::test]
async fn donor_token_cannot_reach_hospital_endpoints() {
    let app = init_app().await;
    register(&app, "/api/auth/register/user", donor_registration("asha@example.com")).await;
    let token = login(&app, "asha@example.com", "user").await;

    let (status, body) = call_json(
        &app,
        Method::PUT,
        "/api/hospitals/inventory",
        Some(&token),
        Some(json!({ "oPositive": 3 })),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], "forbidden");
}

#[actix_web::test]
async fn tampered_token_is_unauthorized() {
    let app = init_app().await;
    register(&app, "/api/auth/register/user", donor_registration("asha@example.com")).await;
    let token = login(&app, "asha@example.com", "user").await;
    let tampered = format!("{token}x");

    let (status, body) =
        call_json(&app, Method::GET, "/api/users/profile", Some(&tampered), None).await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], "unauthorized");
}
