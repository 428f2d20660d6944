//! Per-request tracing span middleware.
//!
//! Creates a span named "request" carrying `correlation_id`, `method`, and
//! `path`, and instruments the downstream future so all logs inside
//! handlers inherit these fields.
//!
//! Ordering: expects `RequestTrace` to have already inserted a
//! [`CorrelationId`] into `req.extensions()`, so wire it after:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)      // reads the id and creates the span
//!     .wrap(RequestTrace)   // outermost: assigns the id, sets the header
//!     // routes...

use std::future::{ready, Ready};
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use actix_web::HttpMessage;
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument, Span};

use crate::middleware::request_trace::CorrelationId;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id = req
            .extensions()
            .get::<CorrelationId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "missing-correlation-id".to_string());

        let method = req.method().clone();
        let path = req.path().to_string();

        let span: Span = info_span!(
            "request",
            correlation_id = %correlation_id,
            method = %method,
            path = %path
        );

        // Enter for the synchronous part of the inner call as well
        let fut = span.in_scope(|| self.service.call(req)).instrument(span);

        Box::pin(fut)
    }
}
