// Integration tests for the liveness check.

use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::correlation_header;
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn healthz_is_ok_with_empty_body() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::get().uri("/healthz").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!correlation_header(&resp).is_empty());

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn healthz_needs_no_credentials() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::get()
        .uri("/healthz")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
