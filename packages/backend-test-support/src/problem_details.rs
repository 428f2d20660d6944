//! Assertions for the two error shapes the service returns: Problem Details
//! from handlers, and the bare unauthorized body from the authorization gate.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Mirror of the backend's Problem Details body, without depending on it.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert a Problem Details response: status, code, optional detail
/// substring, and that the body `trace_id` equals the `x-trace-id` header.
pub async fn assert_problem_details<B>(
    resp: ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike
where
    B: MessageBody,
{
    assert_eq!(resp.status(), expected_status);

    let trace_id_header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();

    let body = actix_web::test::read_body(resp).await;
    let problem: ProblemDetailsLike = serde_json::from_slice(&body)
        .expect("Response body should be valid ProblemDetails JSON");

    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{expected_detail}', but got '{}'",
            problem.detail
        );
    }

    problem
}

/// Assert the gate's rejection: 401 with exactly `{"message":"unauthorized"}`.
pub async fn assert_unauthorized<B>(resp: ServiceResponse<B>)
where
    B: MessageBody,
{
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = actix_web::test::read_body(resp).await;
    let json: Value =
        serde_json::from_slice(&body).expect("Unauthorized body should be valid JSON");
    assert_eq!(json, serde_json::json!({ "message": "unauthorized" }));
}
