//! Bearer token extraction for HTTP handlers.
//!
//! Handlers take an [`AuthContext`] argument to require a valid token, then
//! narrow it with [`AuthContext::require_donor`] or
//! [`AuthContext::require_hospital`]. A missing or bad token is `401`; a
//! valid token of the wrong account kind is `403`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenServiceError;
use crate::domain::{AccountKind, DonorId, Error, HospitalId, Principal};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct AuthContext(Principal);

impl AuthContext {
    /// The caller decoded from the bearer token.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    /// Require a donor token.
    pub fn require_donor(&self) -> Result<DonorId, Error> {
        self.0
            .donor_id()
            .ok_or_else(|| wrong_kind(AccountKind::Donor, self.0.kind()))
    }

    /// Require a hospital token.
    pub fn require_hospital(&self) -> Result<HospitalId, Error> {
        self.0
            .hospital_id()
            .ok_or_else(|| wrong_kind(AccountKind::Hospital, self.0.kind()))
    }
}

fn wrong_kind(required: AccountKind, actual: AccountKind) -> Error {
    let message = match required {
        AccountKind::Donor => "Access denied. Users only.",
        AccountKind::Hospital => "Access denied. Hospitals only.",
    };
    Error::forbidden(message).with_details(serde_json::json!({
        "code": "wrong_account_kind",
        "required": required.as_str(),
        "actual": actual.as_str(),
    }))
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Authentication required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Malformed Authorization header"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Authorization must be a Bearer token"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthContext, Error> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    match state.tokens.verify(token) {
        Ok(principal) => Ok(AuthContext(principal)),
        Err(TokenServiceError::Expired) => Err(Error::unauthorized("Token expired")),
        Err(err) => {
            debug!(error = %err, "rejected bearer token");
            Err(Error::unauthorized("Invalid token"))
        }
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTokenService;
    use crate::inbound::http::test_utils::TestPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    async fn whoami(auth: AuthContext) -> Result<HttpResponse, Error> {
        let hospital = auth.require_hospital()?;
        Ok(HttpResponse::Ok().body(hospital.to_string()))
    }

    async fn call(tokens: MockTokenService, header: Option<&str>) -> (StatusCode, Option<Error>) {
        let mut ports = TestPorts::default();
        ports.tokens = tokens;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        if status.is_success() {
            return (status, None);
        }
        (status, Some(actix_test::read_body_json(response).await))
    }

    fn tokens_returning(result: Result<Principal, TokenServiceError>) -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .returning(move |_| result.clone());
        tokens
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer "))]
    #[actix_web::test]
    async fn missing_or_malformed_header_is_unauthorised(#[case] header: Option<&str>) {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().never();
        let (status, error) = call(tokens, header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.map(|e| e.code()), Some(ErrorCode::Unauthorized));
    }

    #[rstest]
    #[case(TokenServiceError::expired(), "Token expired")]
    #[case(TokenServiceError::invalid("bad signature"), "Invalid token")]
    #[actix_web::test]
    async fn rejected_tokens_are_unauthorised(
        #[case] failure: TokenServiceError,
        #[case] message: &str,
    ) {
        let (status, error) = call(tokens_returning(Err(failure)), Some("Bearer t")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.as_ref().map(Error::message), Some(message));
    }

    #[rstest]
    #[actix_web::test]
    async fn donor_token_on_hospital_route_is_forbidden() {
        let principal = Principal::donor(DonorId::random(), "Asha", "asha@example.org");
        let (status, error) = call(tokens_returning(Ok(principal)), Some("Bearer t")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error.map(|e| e.code()), Some(ErrorCode::Forbidden));
    }

    #[rstest]
    #[actix_web::test]
    async fn hospital_token_is_accepted() {
        let hospital = HospitalId::random();
        let principal = Principal::hospital(hospital, "City General", "desk@city.org");
        let (status, _) = call(tokens_returning(Ok(principal)), Some("Bearer t")).await;
        assert_eq!(status, StatusCode::OK);
    }
}
