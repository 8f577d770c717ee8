//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_http_requests_total` (counter): requests by method, route, status
//! - `gateway_http_request_duration_seconds` (histogram): handler latency by route
//! - `gateway_backend_calls_total` (counter): backend calls by method, outcome
//! - `gateway_backend_call_duration_seconds` (histogram): backend latency by method
//!
//! Recording is cheap and does nothing until [`init_metrics`] installs the
//! Prometheus exporter.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a tokio runtime. Failing to bind or to install
/// the global recorder is fatal to startup.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "gateway_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_http_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a finished backend call.
pub fn record_backend_call(method: &'static str, outcome: &'static str, start: Instant) {
    counter!(
        "gateway_backend_calls_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("gateway_backend_call_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Middleware recording every request against its matched route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
