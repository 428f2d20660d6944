#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::dev::ServiceResponse;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    identity_test_support::logging::init();
}

/// Correlation id echoed on a response.
pub fn correlation_header<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(identity::middleware::CORRELATION_HEADER)
        .expect("x-session-id header should be present")
        .to_str()
        .expect("x-session-id header should be ASCII")
        .to_string()
}
