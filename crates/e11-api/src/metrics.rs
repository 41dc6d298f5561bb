//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use e11_models::DetectionResponse;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "e11_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "e11_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "e11_http_requests_in_flight";

    // Detection metrics
    pub const DETECTIONS_TOTAL: &str = "e11_detections_total";
    pub const DETECTION_DURATION_SECONDS: &str = "e11_detection_duration_seconds";
    pub const DETECT_FAILURES_TOTAL: &str = "e11_detect_failures_total";
}

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed detection: one counter tick per returned object.
pub fn record_detection(response: &DetectionResponse, duration_secs: f64) {
    for detection in &response.detections {
        let labels = [("class", detection.class_name.clone())];
        counter!(names::DETECTIONS_TOTAL, &labels).increment(1);
    }
    histogram!(names::DETECTION_DURATION_SECONDS).record(duration_secs);
}

/// Record a rejected or failed detection request.
pub fn record_detect_failure(kind: &'static str) {
    counter!(names::DETECT_FAILURES_TOTAL, "kind" => kind).increment(1);
}

/// Route template for labels, so ad-hoc paths don't explode cardinality.
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = route_label(request.extensions().get::<MatchedPath>());
    let start = Instant::now();

    // Increment in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    // Decrement in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
