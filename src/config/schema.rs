//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the decoder.
//! All types derive Serde traits for deserialization from config files.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Default endpoint of the NHTSA vPIC flat VIN decoder.
pub const DEFAULT_VIN_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues/";

/// Default endpoint of the plate decoding service.
pub const DEFAULT_PLATE_URL: &str = "https://api.carsxe.com/platedecoder";

/// Default cap on an upstream response body, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Root configuration for the decoder service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DecoderConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound and outbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Upstream decoding services.
    pub providers: ProviderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl ListenerConfig {
    /// Replace the port of the bind address, keeping its host. An unparsable
    /// address falls back to all interfaces.
    pub fn set_port(&mut self, port: u16) {
        let addr = match self.bind_address.parse::<SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                addr
            }
            Err(_) => SocketAddr::from(([0, 0, 0, 0], port)),
        };
        self.bind_address = addr.to_string();
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests and upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for handling one inbound request, in seconds.
    pub request_secs: u64,

    /// Total time allowed for one upstream call, in seconds.
    pub upstream_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
            connect_secs: 5,
        }
    }
}

/// Upstream provider configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the VIN decoding service. The VIN is appended as a path segment.
    pub vin_url: String,

    /// URL of the plate decoding service.
    pub plate_url: String,

    /// API key for the plate decoding service. Usually supplied through
    /// `PLATE_DECODER_API_KEY` rather than the config file.
    pub api_key: Option<String>,

    /// Largest upstream response body accepted, in bytes.
    pub max_response_bytes: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            vin_url: DEFAULT_VIN_URL.to_string(),
            plate_url: DEFAULT_PLATE_URL.to_string(),
            api_key: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// Hand-written so the key never ends up in a log line.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("vin_url", &self.vin_url)
            .field("plate_url", &self.plate_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_response_bytes", &self.max_response_bytes)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}
