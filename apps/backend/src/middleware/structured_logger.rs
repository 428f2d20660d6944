//! One `request_completed` record per request.
//!
//! Wire inside `RequestTrace` so the correlation id is assigned before the
//! request reaches this layer. The authenticated subject is read back from
//! the request extensions after the inner service returns, so requests
//! that pass `RequireAuth` are attributed to their user.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::claims::AuthenticatedUser;
use crate::logging::pii::redact_text;
use crate::middleware::request_trace::CorrelationId;

/// Request facts captured before the inner service consumes the request.
struct RequestLine {
    method: String,
    path: String,
    query: Option<String>,
    host: String,
    client: Option<String>,
    user_agent: Option<String>,
    correlation_id: String,
}

impl RequestLine {
    fn capture(req: &ServiceRequest) -> Self {
        let correlation_id = req
            .extensions()
            .get::<CorrelationId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let (host, client) = {
            let info = req.connection_info();
            (
                info.host().to_string(),
                info.realip_remote_addr().map(str::to_string),
            )
        };

        // query strings can carry emails or tokens
        let query = Some(req.query_string())
            .filter(|q| !q.is_empty())
            .map(redact_text);

        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query,
            host,
            client,
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|ua| ua.to_str().ok())
                .map(str::to_string),
            correlation_id,
        }
    }
}

macro_rules! completed {
    ($level:ident, $line:expr, $status:expr, $size:expr, $user:expr, $duration:expr) => {
        $level!(
            http.method = %$line.method,
            url.path = %$line.path,
            url.query = $line.query.as_deref(),
            server.address = %$line.host,
            client.address = $line.client.as_deref(),
            user_agent.original = $line.user_agent.as_deref(),
            http.status_code = %$status,
            http.response.body.size = $size,
            user_id = $user,
            duration_us = %$duration,
            correlation_id = %$line.correlation_id,
            message = "request_completed"
        )
    };
}

fn emit(
    line: &RequestLine,
    status: StatusCode,
    size: Option<u64>,
    user: Option<&str>,
    duration_us: u64,
) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        completed!(error, line, status_code, size, user, duration_us);
    } else if status.is_client_error() {
        completed!(warn, line, status_code, size, user, duration_us);
    } else {
        completed!(info, line, status_code, size, user, duration_us);
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let line = RequestLine::capture(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let duration_us = start.elapsed().as_micros() as u64;

            match &result {
                Ok(res) => {
                    let size = match res.response().body().size() {
                        BodySize::Sized(n) => Some(n),
                        BodySize::None => Some(0),
                        BodySize::Stream => None,
                    };
                    let user = res
                        .request()
                        .extensions()
                        .get::<AuthenticatedUser>()
                        .map(|u| u.sub.clone());
                    emit(&line, res.status(), size, user.as_deref(), duration_us);
                }
                Err(err) => {
                    let status = err.as_response_error().status_code();
                    emit(&line, status, None, None, duration_us);
                }
            }

            result
        })
    }
}
