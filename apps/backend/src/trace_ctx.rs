//! Task-local trace context for web requests.
//!
//! `RequestTrace` scopes every request future with `with_trace_id`, so any
//! code running under it (error rendering, repo logging) can resolve the
//! current request's trace id without threading it through signatures.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id for the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given trace id bound to the task-local scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
