//! Metrics definitions for the API.
//!
//! Metrics are collected using the `metrics` crate and exported to
//! Prometheus via `metrics-exporter-prometheus` from the binary.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "pages_served_total",
        "Total number of catalog pages successfully served"
    );
    describe_counter!(
        "bad_cursors_total",
        "Total number of requests rejected for a malformed pagination cursor"
    );
    describe_counter!(
        "not_found_total",
        "Total number of requests for entities that do not exist"
    );
    describe_histogram!(
        "page_query_duration_seconds",
        "Time taken to run a catalog page query in seconds"
    );
}

/// Record a successfully served page.
///
/// # Arguments
/// * `entity` - The entity family ("locations", "timeseries", ...)
pub fn record_page_served(entity: &str) {
    counter!("pages_served_total", "entity" => entity.to_string()).increment(1);
}

/// Record a rejected cursor.
pub fn record_bad_cursor() {
    counter!("bad_cursors_total").increment(1);
}

/// Record a not-found response.
pub fn record_not_found(entity: &str) {
    counter!("not_found_total", "entity" => entity.to_string()).increment(1);
}

/// Record page query duration.
pub fn record_page_query_duration(entity: &str, duration_secs: f64) {
    histogram!("page_query_duration_seconds", "entity" => entity.to_string())
        .record(duration_secs);
}
