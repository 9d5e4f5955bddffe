//! Tests for account HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::{AssertionError, MockAssertionVerifier, VerifiedIdentity};
use crate::inbound::http::test_utils::{bearer, memory_state, memory_state_with, register, test_app};
use crate::test_support::MutableClock;

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::fixed())
}

async fn error_body(response: actix_web::dev::ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn register_returns_user_without_password_and_a_token(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;

    let (body, token) = register(&app, "Ada Lovelace", "ada@example.com", None).await;

    assert!(!token.is_empty());
    let user = body["user"].as_object().expect("user object");
    assert_eq!(user.get("name"), Some(&json!("Ada Lovelace")));
    assert_eq!(user.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(user.get("role"), Some(&json!("student")));
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    register(&app, "Ada", "ada@example.com", None).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "Other", "email": "ada@example.com", "password": "x"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["code"], json!("duplicate_identity"));
}

#[rstest]
#[case(json!({"name": "", "email": "a@b.c", "password": "x"}), "name", "empty_name")]
#[case(json!({"name": "A", "email": "nope", "password": "x"}), "email", "invalid_email")]
#[case(json!({"name": "A", "email": "a@b.c", "password": ""}), "password", "empty_password")]
#[case(
    json!({"name": "A", "email": "a@b.c", "password": "x", "role": "warden"}),
    "role",
    "unknown_role"
)]
#[actix_web::test]
async fn invalid_registration_reports_field(
    clock: Arc<MutableClock>,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
    assert_eq!(body["details"]["code"], json!(code));
}

#[rstest]
#[actix_web::test]
async fn admin_role_can_be_requested(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (body, _) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    assert_eq!(body["user"]["role"], json!("admin"));
}

#[rstest]
#[actix_web::test]
async fn login_succeeds_with_correct_password(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (registered, _) = register(&app, "Ada", "ada@example.com", None).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "p@ss1234"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["user"]["id"], registered["user"]["id"]);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[rstest]
#[actix_web::test]
async fn wrong_password_and_unknown_email_look_identical(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    register(&app, "Ada", "ada@example.com", None).await;

    let mut bodies = Vec::new();
    for (email, password) in [("ada@example.com", "wrong"), ("ghost@example.com", "p@ss1234")] {
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": email, "password": password}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(response).await;
        bodies.push((body["code"].clone(), body["message"].clone()));
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].1, json!("invalid credentials"));
}

#[rstest]
#[actix_web::test]
async fn me_requires_a_valid_token(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (registered, token) = register(&app, "Ada", "ada@example.com", None).await;

    let anonymous = actix_test::TestRequest::get().uri("/api/auth/me").to_request();
    let response = actix_test::call_service(&app, anonymous).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let forged = bearer(actix_test::TestRequest::get().uri("/api/auth/me"), "garbage").to_request();
    let response = actix_test::call_service(&app, forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = bearer(actix_test::TestRequest::get().uri("/api/auth/me"), &token).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, registered["user"]);
}

#[rstest]
#[actix_web::test]
async fn expired_token_is_unauthorized(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock.clone()))).await;
    let (_, token) = register(&app, "Ada", "ada@example.com", None).await;

    clock.advance_seconds(24 * 60 * 60);
    let request = bearer(actix_test::TestRequest::get().uri("/api/auth/me"), &token).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn google_login_provisions_once_and_reuses_account(clock: Arc<MutableClock>) {
    let mut verifier = MockAssertionVerifier::new();
    verifier.expect_verify().times(2).returning(|_| {
        Ok(VerifiedIdentity {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
        })
    });
    let app =
        actix_test::init_service(test_app(memory_state_with(clock, Arc::new(verifier)))).await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/google-login")
            .set_json(json!({"token": "header.payload.signature"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["user"]["role"], json!("student"));
        assert_eq!(body["user"]["name"], json!("Grace Hopper"));
        ids.push(body["user"]["id"].clone());
    }
    assert_eq!(ids[0], ids[1]);
}

#[rstest]
#[actix_web::test]
async fn rejected_assertion_is_generic_unauthorized(clock: Arc<MutableClock>) {
    let mut verifier = MockAssertionVerifier::new();
    verifier
        .expect_verify()
        .returning(|_| Err(AssertionError::rejected("audience mismatch")));
    let app =
        actix_test::init_service(test_app(memory_state_with(clock, Arc::new(verifier)))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/google-login")
        .set_json(json!({"token": "header.payload.signature"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(response).await;
    assert_eq!(body["code"], json!("federated_auth_failure"));
    assert_eq!(body["message"], json!("federated authentication failed"));
}

#[rstest]
#[actix_web::test]
async fn blank_google_token_is_invalid_request(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/google-login")
        .set_json(json!({"token": "  "}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["details"]["field"], json!("token"));
}
