// Authorization gate behaviour on the protected `/profile` scope.

use std::time::{Duration, SystemTime};

use actix_web::test;
use identity::DisplayClaims;
use identity_test_support::problem_details::assert_unauthorized;
use serde_json::Value;

use crate::common::correlation_header;
use crate::support::factory::{profile_request, register_and_login};
use crate::support::{create_test_app, keys, test_state};

#[actix_web::test]
async fn missing_header_is_unauthorized() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, profile_request(None)).await;
    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn empty_bearer_token_is_unauthorized() {
    let app = create_test_app(test_state().await).await;

    for value in ["Bearer ", "Bearer", ""] {
        let resp = test::call_service(&app, profile_request(Some(value))).await;
        assert_unauthorized(resp).await;
    }
}

#[actix_web::test]
async fn unrecognized_scheme_is_unauthorized() {
    let app = create_test_app(test_state().await).await;
    let token = keys::tokens()
        .issue("user-1", &DisplayClaims::default())
        .unwrap();

    for value in [format!("Basic {token}"), format!("Token {token}"), token] {
        let resp = test::call_service(&app, profile_request(Some(&value))).await;
        assert_unauthorized(resp).await;
    }
}

#[actix_web::test]
async fn expired_token_is_unauthorized() {
    let app = create_test_app(test_state().await).await;
    let stale = keys::tokens()
        .issue_at(
            "user-1",
            &DisplayClaims::default(),
            SystemTime::now() - Duration::from_secs(31 * 60),
        )
        .unwrap();

    let resp =
        test::call_service(&app, profile_request(Some(&format!("Bearer {stale}")))).await;
    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn token_from_untrusted_key_is_unauthorized() {
    let app = create_test_app(test_state().await).await;
    let forged = keys::foreign_tokens()
        .issue("user-1", &DisplayClaims::default())
        .unwrap();

    let resp =
        test::call_service(&app, profile_request(Some(&format!("Bearer {forged}")))).await;
    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn rejection_still_carries_correlation_id() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, profile_request(Some("Bearer garbage"))).await;
    assert!(!correlation_header(&resp).is_empty());
    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_its_subject() {
    let app = create_test_app(test_state().await).await;
    let (sub, token) = register_and_login(&app, "gate@example.com").await;

    let resp =
        test::call_service(&app, profile_request(Some(&format!("Bearer {token}")))).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], sub);
}
