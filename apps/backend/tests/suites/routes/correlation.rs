// Correlation id propagation through the middleware stack.

use actix_web::http::StatusCode;
use actix_web::test;
use identity::middleware::CORRELATION_HEADER;
use identity_test_support::problem_details::assert_problem_details;
use uuid::Uuid;

use crate::common::correlation_header;
use crate::support::factory::{login_request, PASSWORD};
use crate::support::{create_test_app, test_state};

fn healthz_with(session: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::get().uri("/healthz");
    if let Some(id) = session {
        req = req.insert_header((CORRELATION_HEADER, id));
    }
    req.to_request()
}

#[actix_web::test]
async fn inbound_session_id_is_echoed() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, healthz_with(Some("client-session-42"))).await;
    assert_eq!(correlation_header(&resp), "client-session-42");
}

#[actix_web::test]
async fn missing_session_id_gets_a_fresh_uuid() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, healthz_with(None)).await;
    let id = correlation_header(&resp);
    assert!(Uuid::parse_str(&id).is_ok(), "expected a UUID, got {id}");
}

#[actix_web::test]
async fn unusable_session_id_is_replaced() {
    let app = create_test_app(test_state().await).await;
    let oversized = "x".repeat(200);

    for inbound in ["   ", "has space", oversized.as_str()] {
        let resp = test::call_service(&app, healthz_with(Some(inbound))).await;
        let id = correlation_header(&resp);
        assert_ne!(id, inbound);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}

#[actix_web::test]
async fn concurrent_requests_get_distinct_ids() {
    let app = create_test_app(test_state().await).await;

    let (first, second) = futures_util::join!(
        test::call_service(&app, healthz_with(None)),
        test::call_service(&app, healthz_with(None)),
    );

    assert_ne!(correlation_header(&first), correlation_header(&second));
}

#[actix_web::test]
async fn error_body_carries_the_session_id() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header((CORRELATION_HEADER, "trace-me"))
        .set_json(serde_json::json!({ "email": "ghost@example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(correlation_header(&resp), "trace-me");

    let problem = assert_problem_details(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    assert_eq!(problem.trace_id, "trace-me");

    // same path without an inbound id
    let resp = test::call_service(&app, login_request("ghost@example.com", PASSWORD)).await;
    let header = correlation_header(&resp);
    let problem = assert_problem_details(
        resp,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    assert_eq!(problem.trace_id, header);
}
