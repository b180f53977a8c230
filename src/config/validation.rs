//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, size limits > 0)
//! - Keep the upstream timeout inside the inbound request deadline
//! - Check that addresses and provider URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DecoderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::DecoderConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("{field} must be an absolute http(s) URL, got '{value}'")]
    ProviderUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.upstream_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamOutlastsRequest { upstream: u64, request: u64 },
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &DecoderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (field, value) in [
        ("providers.vin_url", &config.providers.vin_url),
        ("providers.plate_url", &config.providers.plate_url),
    ] {
        if !is_http_url(value) {
            errors.push(ValidationError::ProviderUrl {
                field,
                value: value.clone(),
            });
        }
    }

    for (field, value) in [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.connect_secs", config.timeouts.connect_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    // An upstream timeout must surface as a decode result, not an inbound 408.
    if config.timeouts.upstream_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::UpstreamOutlastsRequest {
            upstream: config.timeouts.upstream_secs,
            request: config.timeouts.request_secs,
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if config.providers.max_response_bytes == 0 {
        errors.push(ValidationError::Zero("providers.max_response_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
