//! Tests for complaint HTTP handlers.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{bearer, memory_state, register, test_app};
use crate::test_support::MutableClock;

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::fixed())
}

async fn file_complaint<S>(app: &S, token: &str, title: &str, category: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = bearer(actix_test::TestRequest::post().uri("/api/complaints"), token)
        .set_json(json!({
            "title": title,
            "description": "Needs attention",
            "category": category,
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn create_applies_defaults(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (user, token) = register(&app, "Asha", "asha@example.com", None).await;

    let complaint = file_complaint(&app, &token, "Leaking tap", "Plumbing").await;

    assert_eq!(complaint["owner"], user["user"]["id"]);
    assert_eq!(complaint["status"], json!("Pending"));
    assert_eq!(complaint["priority"], json!("Medium"));
    assert_eq!(complaint["isConfirmedByStudent"], json!(false));
    assert_eq!(complaint["adminRemarks"], Value::Null);
    assert_eq!(complaint["createdAt"], complaint["updatedAt"]);
}

#[rstest]
#[case(json!({"title": "t", "description": "d", "category": "Roofing"}), "category")]
#[case(json!({"title": " ", "description": "d", "category": "Other"}), "title")]
#[case(json!({"title": "t", "description": "", "category": "Other"}), "description")]
#[case(
    json!({"title": "t", "description": "d", "category": "Other", "priority": "Urgent"}),
    "priority"
)]
#[actix_web::test]
async fn invalid_complaints_are_rejected(
    clock: Arc<MutableClock>,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, token) = register(&app, "Asha", "asha@example.com", None).await;

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::post().uri("/api/complaints"), &token).set_json(&payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[case(json!({"title": "Leak", "description": "d"}), "category", "missing_field")]
#[case(json!({"description": "d", "category": "Other"}), "title", "missing_field")]
#[case(json!({"title": 5, "description": "d", "category": "Other"}), "body", "malformed_body")]
#[actix_web::test]
async fn malformed_bodies_use_the_error_envelope(
    clock: Arc<MutableClock>,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, token) = register(&app, "Asha", "asha@example.com", None).await;

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::post().uri("/api/complaints"), &token).set_json(&payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
    assert_eq!(body["details"]["code"], json!(code));
}

#[rstest]
#[actix_web::test]
async fn non_json_body_uses_the_error_envelope(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, token) = register(&app, "Asha", "asha@example.com", None).await;

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::post().uri("/api/complaints"), &token)
            .insert_header(("content-type", "text/plain"))
            .set_payload("title=Leak"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!("unsupported_content_type"));
}

#[rstest]
#[actix_web::test]
async fn create_requires_authentication(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(json!({"title": "t", "description": "d", "category": "Other"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("unauthorized"));
}

#[rstest]
#[actix_web::test]
async fn my_complaints_are_scoped_to_the_caller(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock.clone()))).await;
    let (_, asha) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, ben) = register(&app, "Ben", "ben@example.com", None).await;

    let first = file_complaint(&app, &asha, "Tap", "Plumbing").await;
    clock.advance_seconds(60);
    let second = file_complaint(&app, &asha, "Socket", "Electrical").await;
    file_complaint(&app, &ben, "Door", "Carpentry").await;

    let (status, mine) = send(
        &app,
        bearer(actix_test::TestRequest::get().uri("/api/complaints/my"), &asha),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = mine
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["id"].clone())
        .collect();
    assert_eq!(ids, vec![second["id"].clone(), first["id"].clone()]);

    let (_, plumbing) = send(
        &app,
        bearer(
            actix_test::TestRequest::get().uri("/api/complaints/my?category=Plumbing"),
            &asha,
        ),
    )
    .await;
    assert_eq!(plumbing.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn admin_listing_is_forbidden_to_students(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::get().uri("/api/complaints"), &student),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("forbidden"));
}

#[rstest]
#[actix_web::test]
async fn admin_listing_includes_owner_details_and_filters(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock.clone()))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    file_complaint(&app, &student, "Tap", "Plumbing").await;
    clock.advance_seconds(60);
    let newest = file_complaint(&app, &student, "Socket", "Electrical").await;

    let (status, all) = send(
        &app,
        bearer(actix_test::TestRequest::get().uri("/api/complaints"), &admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().expect("array");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], newest["id"]);
    assert_eq!(all[0]["ownerDetails"]["name"], json!("Asha"));
    assert_eq!(all[0]["ownerDetails"]["email"], json!("asha@example.com"));

    let (_, pending) = send(
        &app,
        bearer(
            actix_test::TestRequest::get().uri("/api/complaints?status=In%20Progress"),
            &admin,
        ),
    )
    .await;
    assert_eq!(pending, json!([]));

    let (status, body) = send(
        &app,
        bearer(
            actix_test::TestRequest::get().uri("/api/complaints?status=Done"),
            &admin,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["value"], json!("Done"));
}

#[rstest]
#[case("/api/complaints?status=&category=")]
#[case("/api/complaints?status=%20&category=")]
#[case("/api/complaints?category=")]
#[actix_web::test]
async fn blank_filters_list_everything(clock: Arc<MutableClock>, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(memory_state(clock.clone()))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    file_complaint(&app, &student, "Tap", "Plumbing").await;
    clock.advance_seconds(60);
    file_complaint(&app, &student, "Socket", "Electrical").await;

    let (status, all) = send(&app, bearer(actix_test::TestRequest::get().uri(uri), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (status, mine) = send(
        &app,
        bearer(
            actix_test::TestRequest::get().uri(&uri.replace("/api/complaints", "/api/complaints/my")),
            &student,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn status_updates_are_admin_only(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;
    let complaint = file_complaint(&app, &student, "Tap", "Plumbing").await;
    let uri = format!("/api/complaints/{}", complaint["id"].as_str().expect("id"));

    let (status, _) = send(
        &app,
        bearer(actix_test::TestRequest::patch().uri(&uri), &student)
            .set_json(json!({"status": "Resolved"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn admin_sets_status_and_replaces_remarks(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock.clone()))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    let complaint = file_complaint(&app, &student, "Tap", "Plumbing").await;
    let uri = format!("/api/complaints/{}", complaint["id"].as_str().expect("id"));

    clock.advance_seconds(30);
    let (status, updated) = send(
        &app,
        bearer(actix_test::TestRequest::patch().uri(&uri), &admin)
            .set_json(json!({"status": "In Progress", "adminRemarks": "Plumber booked"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], json!("In Progress"));
    assert_eq!(updated["adminRemarks"], json!("Plumber booked"));
    assert_ne!(updated["updatedAt"], complaint["updatedAt"]);

    let (_, cleared) = send(
        &app,
        bearer(actix_test::TestRequest::patch().uri(&uri), &admin)
            .set_json(json!({"status": "Resolved"})),
    )
    .await;
    assert_eq!(cleared["status"], json!("Resolved"));
    assert_eq!(cleared["adminRemarks"], Value::Null);
}

#[rstest]
#[case("/api/complaints/00000000-0000-0000-0000-000000000000", json!({"status": "Resolved"}), StatusCode::NOT_FOUND)]
#[case("/api/complaints/not-a-uuid", json!({"status": "Resolved"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn status_update_rejects_bad_targets(
    clock: Arc<MutableClock>,
    #[case] uri: &str,
    #[case] payload: Value,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    let (status, _) = send(
        &app,
        bearer(actix_test::TestRequest::patch().uri(uri), &admin).set_json(&payload),
    )
    .await;
    assert_eq!(status, expected);
}

#[rstest]
#[actix_web::test]
async fn unknown_status_value_is_invalid_request(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, student) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    let complaint = file_complaint(&app, &student, "Tap", "Plumbing").await;
    let uri = format!("/api/complaints/{}", complaint["id"].as_str().expect("id"));

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::patch().uri(&uri), &admin)
            .set_json(json!({"status": "Closed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("status"));
}

#[rstest]
#[actix_web::test]
async fn confirm_follows_the_lifecycle(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, owner) = register(&app, "Asha", "asha@example.com", None).await;
    let (_, other) = register(&app, "Ben", "ben@example.com", None).await;
    let (_, admin) = register(&app, "Warden", "warden@example.com", Some("admin")).await;
    let complaint = file_complaint(&app, &owner, "Tap", "Plumbing").await;
    let id = complaint["id"].as_str().expect("id");
    let confirm_uri = format!("/api/complaints/{id}/confirm");

    let (status, body) = send(
        &app,
        bearer(actix_test::TestRequest::post().uri(&confirm_uri), &owner),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_transition"));

    send(
        &app,
        bearer(
            actix_test::TestRequest::patch().uri(&format!("/api/complaints/{id}")),
            &admin,
        )
        .set_json(json!({"status": "Resolved", "adminRemarks": "Fixed"})),
    )
    .await;

    let (status, _) = send(
        &app,
        bearer(actix_test::TestRequest::post().uri(&confirm_uri), &other),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let (status, confirmed) = send(
            &app,
            bearer(actix_test::TestRequest::post().uri(&confirm_uri), &owner),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(confirmed["isConfirmedByStudent"], json!(true));
        assert_eq!(confirmed["status"], json!("Resolved"));
    }
}

#[rstest]
#[actix_web::test]
async fn confirm_unknown_complaint_is_not_found(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(test_app(memory_state(clock))).await;
    let (_, owner) = register(&app, "Asha", "asha@example.com", None).await;
    let (status, body) = send(
        &app,
        bearer(
            actix_test::TestRequest::post()
                .uri("/api/complaints/00000000-0000-0000-0000-000000000001/confirm"),
            &owner,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}
