//! Request helpers that drive the public endpoints.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct horse battery staple";

pub fn register_request(email: &str, password: &str) -> Request {
    test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "email": email,
            "password": password,
            "username": "alice",
            "firstName": "Alice",
            "lastName": "Liddell",
        }))
        .to_request()
}

pub fn login_request(email: &str, password: &str) -> Request {
    test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request()
}

pub fn profile_request(authorization: Option<&str>) -> Request {
    let mut req = test::TestRequest::get().uri("/profile");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    req.to_request()
}

/// Register `email` with [`PASSWORD`] and return the new subject.
pub async fn register<S>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, register_request(email, PASSWORD)).await;
    assert_eq!(resp.status(), 201, "registration should succeed");
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_str().expect("id should be a string").to_string()
}

/// Register `email` and log in, returning `(sub, token)`.
pub async fn register_and_login<S>(app: &S, email: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let sub = register(app, email).await;

    let resp = test::call_service(app, login_request(email, PASSWORD)).await;
    assert_eq!(resp.status(), 200, "login should succeed");
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token should be a string");
    (sub, token.to_string())
}
