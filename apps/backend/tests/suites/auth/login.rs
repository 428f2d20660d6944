// Integration tests for `POST /auth/login`.

use actix_web::http::StatusCode;
use actix_web::test;
use identity_test_support::problem_details::assert_problem_details;
use serde_json::Value;

use crate::support::factory::{login_request, register, PASSWORD};
use crate::support::{create_test_app, keys, test_state};

#[actix_web::test]
async fn login_returns_token_for_registered_user() {
    let app = create_test_app(test_state().await).await;
    let sub = register(&app, "login@example.com").await;

    let resp = test::call_service(&app, login_request("login@example.com", PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "success");

    let token = body["token"].as_str().expect("token should be a string");
    let claims = keys::tokens().verify(token).expect("issued token should verify");
    assert_eq!(claims.sub, sub);
    assert_eq!(claims.iss, "users-service");
    assert_eq!(claims.exp - claims.iat, 30 * 60);
    assert_eq!(claims.email.as_deref(), Some("login@example.com"));
    assert_eq!(claims.username.as_deref(), Some("alice"));
}

#[actix_web::test]
async fn login_email_is_case_insensitive() {
    let app = create_test_app(test_state().await).await;
    register(&app, "Mixed.Case@Example.com").await;

    let resp = test::call_service(&app, login_request("mixed.case@example.COM", PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = create_test_app(test_state().await).await;
    register(&app, "victim@example.com").await;

    let wrong_password =
        test::call_service(&app, login_request("victim@example.com", "guess")).await;
    let wrong = assert_problem_details(
        wrong_password,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let unknown_email =
        test::call_service(&app, login_request("nobody@example.com", PASSWORD)).await;
    let unknown = assert_problem_details(
        unknown_email,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    assert_eq!(wrong.detail, unknown.detail);
    assert_eq!(wrong.title, unknown.title);
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"email": "a@b.com", "password": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem =
        assert_problem_details(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, Some("Invalid JSON"))
            .await;
    assert!(!problem.detail.contains("a@b.com"));
}
