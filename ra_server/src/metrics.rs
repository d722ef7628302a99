//! Prometheus metrics for monitoring authentication traffic.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener
//! when `METRICS_BIND` is configured.

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Sets up a Prometheus scrape endpoint on the specified address.
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record the outcome of an authentication operation.
///
/// `operation` is one of `register`, `login`, `access`, `cleanup`;
/// `outcome` is `ok` or a failure kind.
pub fn record_auth_request(operation: &'static str, outcome: &'static str) {
    counter!("auth_requests_total", "operation" => operation, "outcome" => outcome).increment(1);
}
