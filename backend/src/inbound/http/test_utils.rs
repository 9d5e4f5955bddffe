//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use crate::domain::ports::{AssertionVerifier, DisabledAssertionVerifier};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::test_support::{MutableClock, in_memory_state};

/// Full `/api` surface over in-memory adapters.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(configure_api))
}

/// In-memory state with federated login disabled.
pub fn memory_state(clock: Arc<MutableClock>) -> HttpState {
    memory_state_with(clock, Arc::new(DisabledAssertionVerifier))
}

pub fn memory_state_with(
    clock: Arc<MutableClock>,
    verifier: Arc<dyn AssertionVerifier>,
) -> HttpState {
    in_memory_state(clock, verifier).expect("test state builds")
}

/// Register an account and return `(body, token)`.
pub async fn register<S>(app: &S, name: &str, email: &str, role: Option<&str>) -> (Value, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut body = json!({ "name": name, "email": email, "password": "p@ss1234" });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let value: Value = actix_test::read_body_json(response).await;
    let token = value["token"].as_str().expect("token").to_owned();
    (value, token)
}

/// Attach `Authorization: Bearer <token>`.
pub fn bearer(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}
