//! Authorization gate for protected scopes.
//!
//! A request enters [`RequireAuth`] unauthenticated and leaves it in one of
//! two terminal states: authenticated, with its subject stored in request
//! extensions as [`AuthenticatedUser`], or rejected, answered with a bare
//! 401 `{"message":"unauthorized"}` without the inner service ever running.
//! Why a request was rejected is logged, never returned.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::body::EitherBody;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde_json::json;

use crate::auth::claims::AuthenticatedUser;
use crate::auth::errors::AuthError;
use crate::auth::jwt::TokenService;
use crate::logging::security;

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    UnsupportedScheme,
    EmptyToken,
    Token(AuthError),
    MissingSubject,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::MissingHeader => "missing_authorization",
            Rejection::UnsupportedScheme => "unsupported_scheme",
            Rejection::EmptyToken => "empty_token",
            Rejection::Token(err) => err.reason(),
            Rejection::MissingSubject => "missing_subject",
        }
    }

    fn detail(&self) -> String {
        match self {
            Rejection::Token(err) => err.to_string(),
            other => other.reason().to_string(),
        }
    }
}

/// Resolve the caller's identity from an `Authorization` header value.
///
/// Pure and CPU-bound: no I/O beyond signature verification.
pub fn authorize(
    header: Option<&HeaderValue>,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, Rejection> {
    let raw = header
        .map(|value| value.to_str().map_err(|_| Rejection::UnsupportedScheme))
        .transpose()?
        .unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(Rejection::MissingHeader);
    }

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(Rejection::UnsupportedScheme)?
        .trim();
    if token.is_empty() {
        return Err(Rejection::EmptyToken);
    }

    let claims = tokens.verify(token).map_err(Rejection::Token)?;
    if claims.sub.trim().is_empty() {
        return Err(Rejection::MissingSubject);
    }

    Ok(AuthenticatedUser { sub: claims.sub })
}

/// Wrap a scope with `RequireAuth::new(tokens)` to protect every route in it.
#[derive(Clone)]
pub struct RequireAuth {
    tokens: TokenService,
}

impl RequireAuth {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGate<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGate {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGate<S> {
    service: S,
    tokens: TokenService,
}

fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(json!({ "message": "unauthorized" }))
}

impl<S, B> Service<ServiceRequest> for AuthGate<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(req.headers().get(header::AUTHORIZATION), &self.tokens) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => {
                security::auth_rejected(rejection.reason(), &rejection.detail());
                // The request is consumed here, so nothing downstream can answer it.
                let res = req.into_response(unauthorized_response());
                Box::pin(async move { Ok(res.map_into_right_body()) })
            }
        }
    }
}
