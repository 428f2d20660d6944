//! Task-local correlation context for web requests.
//!
//! `RequestTrace` runs the rest of the pipeline inside [`scope`], so error
//! rendering and security logging can read the current request's
//! correlation id without threading it through every call. Each request is
//! its own task scope; concurrent requests never observe each other's id.
//!
//! Services and repositories receive the id through the tracing span rather
//! than importing this module.

use std::future::Future;

use tokio::task_local;

task_local! {
    static CORRELATION_ID: String;
}

/// Correlation id of the request being handled by the current task,
/// or `"unknown"` outside of a request scope.
pub fn correlation_id() -> String {
    CORRELATION_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `id` as the task-local correlation id.
pub async fn scope<F, R>(id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    CORRELATION_ID.scope(id, future).await
}

/// Run the synchronous closure `f` with `id` as the task-local correlation id.
pub fn sync_scope<F, R>(id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    CORRELATION_ID.sync_scope(id, f)
}
