// Integration tests for `GET /profile`.

use actix_web::http::StatusCode;
use actix_web::test;
use identity::DisplayClaims;
use identity_test_support::problem_details::{assert_problem_details, assert_unauthorized};
use serde_json::Value;

use crate::support::factory::{profile_request, register_and_login};
use crate::support::{create_test_app, keys, test_state};

#[actix_web::test]
async fn profile_returns_public_view_of_caller() {
    let app = create_test_app(test_state().await).await;
    let (sub, token) = register_and_login(&app, "profile@example.com").await;

    let resp = test::call_service(&app, profile_request(Some(&format!("Bearer {token}")))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "success");

    let user = &body["user"];
    assert_eq!(user["id"], sub.as_str());
    assert_eq!(user["href"], format!("/users/{sub}"));
    assert_eq!(user["email"], "profile@example.com");
    assert_eq!(user["username"], "alice");
    assert_eq!(user["firstName"], "Alice");
    assert_eq!(user["lastName"], "Liddell");
    assert!(user["createdAt"].is_string());
    assert!(user["updatedAt"].is_string());
}

#[actix_web::test]
async fn profile_never_carries_the_digest() {
    let app = create_test_app(test_state().await).await;
    let (_, token) = register_and_login(&app, "digest@example.com").await;

    let resp = test::call_service(&app, profile_request(Some(&format!("Bearer {token}")))).await;
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);

    assert!(!text.contains("password"));
    assert!(!text.contains("$2b$"));
}

#[actix_web::test]
async fn profile_without_token_is_unauthorized() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, profile_request(None)).await;
    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn token_for_unknown_subject_is_not_found() {
    let app = create_test_app(test_state().await).await;

    let token = keys::tokens()
        .issue("no-such-user", &DisplayClaims::default())
        .expect("token should issue");

    let resp = test::call_service(&app, profile_request(Some(&format!("Bearer {token}")))).await;
    assert_problem_details(resp, "USER_NOT_FOUND", StatusCode::NOT_FOUND, None).await;
}
