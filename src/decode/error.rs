//! Decode error taxonomy.

use thiserror::Error;

use crate::decode::transport::TransportError;
use crate::decode::types::Provider;

/// Errors that can occur while decoding a request.
///
/// Every variant is recoverable; the router folds them into a failed
/// [`DecodeResult`](crate::decode::DecodeResult).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Neither a VIN nor a complete plate and state was supplied.
    #[error("must supply either a VIN or a plate and state")]
    InvalidInput,

    /// Plate decode requested without an API key.
    #[error("plate decoding unavailable: no API key configured")]
    MissingCredential,

    /// The upstream call could not be completed.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: TransportError,
    },

    /// The upstream answered with something other than 200 OK.
    #[error("{provider} returned HTTP {status}")]
    UpstreamStatus { provider: Provider, status: u16 },

    /// The upstream body was not a usable JSON attribute map.
    #[error("{provider} returned a malformed response: {reason}")]
    MalformedResponse { provider: Provider, reason: String },
}

impl DecodeError {
    /// Short outcome label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidInput => "invalid_input",
            DecodeError::MissingCredential => "missing_credential",
            DecodeError::Transport { .. } => "transport",
            DecodeError::UpstreamStatus { .. } => "upstream_status",
            DecodeError::MalformedResponse { .. } => "malformed_response",
        }
    }
}
