// Integration tests for `POST /auth/register`.

use actix_web::http::StatusCode;
use actix_web::test;
use identity_test_support::problem_details::assert_problem_details;
use serde_json::Value;
use uuid::Uuid;

use crate::support::factory::{register, register_request, PASSWORD};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn register_returns_created_with_subject() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, register_request("new@example.com", PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "success");
    let id = body["id"].as_str().expect("id should be a string");
    assert!(Uuid::parse_str(id).is_ok());
}

#[actix_web::test]
async fn duplicate_email_is_conflict() {
    let app = create_test_app(test_state().await).await;
    register(&app, "taken@example.com").await;

    let resp = test::call_service(&app, register_request("TAKEN@example.com", "other")).await;
    assert_problem_details(
        resp,
        "USER_ALREADY_EXISTS",
        StatusCode::CONFLICT,
        Some("already exists"),
    )
    .await;
}

#[actix_web::test]
async fn invalid_input_is_validation_error() {
    let app = create_test_app(test_state().await).await;

    let cases = [
        register_request("not-an-email", PASSWORD),
        register_request("ok@example.com", ""),
    ];
    for req in cases {
        let resp = test::call_service(&app, req).await;
        assert_problem_details(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST, None).await;
    }
}
