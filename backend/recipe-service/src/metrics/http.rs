use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, HistogramVec};

lazy_static! {
    /// API request latency by method, matched route pattern and status.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "recipe_http_request_duration_seconds",
        "API request duration segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register recipe_http_request_duration_seconds");
}

/// Route label used when no resource pattern matched the path.
pub const UNMATCHED_ROUTE: &str = "unmatched";

pub fn observe_request(method: &str, route: &str, status: u16, seconds: f64) {
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, route, &status.to_string()])
        .observe(seconds);
}
