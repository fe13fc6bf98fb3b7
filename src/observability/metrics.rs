//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bangs_resolutions_total` (counter): resolutions by outcome
//! - `bangs_resolution_duration_seconds` (histogram): time spent resolving
//! - `bangs_registry_entries` (gauge): bangs in the active registry
//! - `bangs_registry_reloads_total` (counter): registries swapped in at runtime

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Resolution outcome label values.
pub const OUTCOME_REDIRECT: &str = "redirect";
pub const OUTCOME_FALLBACK: &str = "fallback";
pub const OUTCOME_NOT_FOUND: &str = "not_found";
pub const OUTCOME_BAD_REQUEST: &str = "bad_request";

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one resolution.
pub fn record_resolution(outcome: &'static str, start: Instant) {
    metrics::counter!("bangs_resolutions_total", "outcome" => outcome).increment(1);
    metrics::histogram!("bangs_resolution_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Publish the size of the active registry.
pub fn record_registry_size(entries: usize) {
    metrics::gauge!("bangs_registry_entries").set(entries as f64);
}

pub fn record_registry_reload() {
    metrics::counter!("bangs_registry_reloads_total").increment(1);
}
