//! Metrics collection and exposition.
//!
//! # Metrics
//! - `decoder_requests_total` (counter): decodes by provider, outcome
//! - `decoder_request_duration_seconds` (histogram): end-to-end decode latency
//! - `decoder_upstream_responses_total` (counter): upstream answers by provider, status
//! - `decoder_upstream_duration_seconds` (histogram): upstream call latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished decode.
pub fn record_decode(provider: &'static str, outcome: &'static str, start: Instant) {
    counter!("decoder_requests_total", "provider" => provider, "outcome" => outcome).increment(1);
    histogram!("decoder_request_duration_seconds", "provider" => provider)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream response.
pub fn record_upstream(provider: &'static str, status: u16, start: Instant) {
    counter!(
        "decoder_upstream_responses_total",
        "provider" => provider,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("decoder_upstream_duration_seconds", "provider" => provider)
        .record(start.elapsed().as_secs_f64());
}
