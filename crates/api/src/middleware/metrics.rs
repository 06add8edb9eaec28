//! HTTP request metrics and the Prometheus scrape endpoint.

use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Histogram buckets for request latency, in seconds.
const DURATION_BUCKETS: [f64; 10] = [
    0.001, 0.005, 0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0,
];

/// Installs the global Prometheus recorder and keeps the render handle
/// for [`metrics_handler`]. Call once at startup, before the first request.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .set_buckets(&DURATION_BUCKETS)?
        .install_recorder()?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus recorder installed twice"))?;

    Ok(())
}

/// Records `http_requests_total` and `http_request_duration_seconds` for
/// every request passing through the router.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = method_label(req.method());
    // Requests that match no route share one label so 404 scans cannot
    // inflate series cardinality.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(req).await;
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method,
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(started.elapsed().as_secs_f64());

    response
}

// Extension methods are folded into one label to keep the series bounded.
fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

/// Record a language pack download, split by full response vs 304.
pub fn record_language_pack_served(language_code: &str, not_modified: bool) {
    let result = if not_modified { "not_modified" } else { "ok" };
    counter!(
        "language_pack_requests_total",
        "language" => language_code.to_string(),
        "result" => result
    )
    .increment(1);
}

/// Serves the Prometheus text exposition for `GET /metrics`.
pub async fn metrics_handler() -> Response {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_method_label_folds_extensions() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::DELETE), "DELETE");
        assert_eq!(method_label(&Method::TRACE), "OTHER");
    }

    #[tokio::test]
    async fn test_middleware_is_transparent() {
        // Recording without an installed recorder is a no-op; the response
        // must come through untouched either way.
        let app = Router::new()
            .route("/probe", get(|| async { (StatusCode::CREATED, "made") }))
            .layer(middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/probe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_scrape_endpoint_without_recorder() {
        // Unit tests never install the global recorder, so the handler
        // reports the scrape as unavailable.
        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
