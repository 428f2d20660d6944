//! Correlation tracker.
//!
//! Assigns every request a correlation id, reusing the inbound
//! `x-session-id` header when it carries a usable value and generating a
//! UUID v4 otherwise. The id is stored in request extensions as
//! [`CorrelationId`], echoed on the response, and installed as the
//! task-local id for the rest of the pipeline (see [`crate::trace_ctx`]).

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

/// Header carrying the correlation id in both directions.
pub const CORRELATION_HEADER: &str = "x-session-id";

const MAX_INBOUND_LEN: usize = 128;

/// Correlation id of the current request, read from request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reuse a well-formed inbound value or mint a fresh one.
    pub fn from_inbound(inbound: Option<&HeaderValue>) -> Self {
        inbound
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| is_acceptable(value))
            .map(|value| Self(value.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

// Inbound ids end up in log lines and a response header.
fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_INBOUND_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id =
            CorrelationId::from_inbound(req.headers().get(CORRELATION_HEADER));
        let id = correlation_id.0.clone();

        req.extensions_mut().insert(correlation_id);

        // Inner middlewares do their synchronous work inside `call`, so that
        // runs in the scope too.
        let fut = trace_ctx::sync_scope(id.clone(), || self.service.call(req));

        Box::pin(async move {
            let mut res = trace_ctx::scope(id.clone(), fut).await?;
            if let Ok(value) = HeaderValue::from_str(&id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(CORRELATION_HEADER), value);
            }
            Ok(res)
        })
    }
}
