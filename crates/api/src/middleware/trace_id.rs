//! Request correlation.
//!
//! Every request runs inside a span tagged with a trace id, and the id is
//! echoed in the response so the dashboard frontend can cross-reference a
//! failed call with backend logs.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

static TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Caller-supplied ids longer than this are discarded; they would bloat
/// every log line of the request.
const MAX_TRACE_ID_LEN: usize = 64;

/// Adopts the caller's `X-Trace-ID` or generates one, spans the request
/// with it and echoes it back on the response.
pub async fn trace_id(req: Request<Body>, next: Next) -> Response {
    let trace_id = incoming_trace_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = std::time::Instant::now();
    let mut response = next.run(req).instrument(span).await;

    tracing::info!(
        trace_id = %trace_id,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(&TRACE_ID_HEADER, value);
    }

    response
}

fn incoming_trace_id(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(&TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_TRACE_ID_LEN)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn response_trace_id(request: Request<Body>) -> String {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(trace_id));

        let response = app.oneshot(request).await.unwrap();
        response.headers()[&TRACE_ID_HEADER]
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn test_caller_trace_id_is_echoed() {
        let request = Request::builder()
            .uri("/")
            .header("x-trace-id", "dashboard-7f3a")
            .body(Body::empty())
            .unwrap();

        assert_eq!(response_trace_id(request).await, "dashboard-7f3a");
    }

    #[tokio::test]
    async fn test_missing_trace_id_gets_generated() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let id = response_trace_id(request).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_oversized_trace_id_is_replaced() {
        let request = Request::builder()
            .uri("/")
            .header("x-trace-id", "x".repeat(MAX_TRACE_ID_LEN + 1))
            .body(Body::empty())
            .unwrap();

        let id = response_trace_id(request).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
