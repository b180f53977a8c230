//! Decode request router.
//!
//! # Responsibilities
//! - Classify a request as VIN, plate, or invalid
//! - Build the upstream query for the selected provider
//! - Make exactly one upstream call (or none for invalid/unconfigured requests)
//! - Normalize the upstream response or failure into a [`DecodeResult`]

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::config::ProviderConfig;
use crate::decode::error::DecodeError;
use crate::decode::transport::{HttpTransport, UpstreamResponse};
use crate::decode::types::{DecodeQuery, DecodeRequest, DecodeResult, Provider, ProviderCredential};
use crate::observability::metrics;

/// Parsed upstream endpoints.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub vin: Url,
    pub plate: Url,
}

/// A provider URL that cannot serve as an upstream endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("{field}: {source}")]
    Parse {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{field} cannot be used as a base URL: '{value}'")]
    NotABase { field: &'static str, value: String },
}

impl ProviderEndpoints {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, EndpointError> {
        Ok(Self {
            vin: parse_endpoint("providers.vin_url", &config.vin_url)?,
            plate: parse_endpoint("providers.plate_url", &config.plate_url)?,
        })
    }
}

// The VIN is appended as a path segment, which needs a base URL.
fn parse_endpoint(field: &'static str, value: &str) -> Result<Url, EndpointError> {
    let url = Url::parse(value).map_err(|source| EndpointError::Parse { field, source })?;
    if url.cannot_be_a_base() {
        return Err(EndpointError::NotABase {
            field,
            value: value.to_string(),
        });
    }
    Ok(url)
}

/// Routes decode requests to the VIN or plate decoding service.
///
/// Holds only immutable state, so one instance is shared by every request.
#[derive(Clone)]
pub struct DecodeRouter {
    transport: Arc<dyn HttpTransport>,
    endpoints: ProviderEndpoints,
    credential: ProviderCredential,
}

impl DecodeRouter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        endpoints: ProviderEndpoints,
        credential: ProviderCredential,
    ) -> Self {
        Self {
            transport,
            endpoints,
            credential,
        }
    }

    pub fn credential(&self) -> &ProviderCredential {
        &self.credential
    }

    /// Decode a request into a result. Never fails; errors are carried in the result.
    pub async fn decode(&self, request: &DecodeRequest) -> DecodeResult {
        let query = request.classify();
        let provider = query.label();
        let start = Instant::now();

        let result = self.resolve(query).await;
        match &result {
            Ok(data) => {
                tracing::info!(provider, attributes = data.len(), "Decode succeeded");
                metrics::record_decode(provider, "success", start);
            }
            Err(e) => {
                tracing::warn!(provider, error = %e, "Decode failed");
                metrics::record_decode(provider, e.kind(), start);
            }
        }

        result.into()
    }

    /// Resolve a classified query into the upstream attribute map.
    pub async fn resolve(&self, query: DecodeQuery) -> Result<Map<String, Value>, DecodeError> {
        match query {
            DecodeQuery::Vin { vin, model_year } => {
                let url = self.vin_url(&vin, model_year.as_deref());
                tracing::debug!(vin = %vin, model_year = ?model_year, "Querying VIN decoding service");
                let response = self.fetch(Provider::Vin, &url).await?;
                parse_attributes(Provider::Vin, response)
            }
            DecodeQuery::Plate {
                plate,
                jurisdiction,
            } => {
                let key = self.credential.key().ok_or(DecodeError::MissingCredential)?;
                let url = self.plate_url(&plate, &jurisdiction, key);
                tracing::debug!(
                    plate = %plate,
                    jurisdiction = %jurisdiction,
                    host = url.host_str().unwrap_or_default(),
                    "Querying plate decoding service"
                );
                let response = self.fetch(Provider::Plate, &url).await?;
                parse_attributes(Provider::Plate, response)
            }
            DecodeQuery::Invalid => Err(DecodeError::InvalidInput),
        }
    }

    async fn fetch(&self, provider: Provider, url: &Url) -> Result<UpstreamResponse, DecodeError> {
        let started = Instant::now();
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|source| DecodeError::Transport { provider, source })?;
        metrics::record_upstream(provider.label(), response.status, started);

        if response.status != 200 {
            return Err(DecodeError::UpstreamStatus {
                provider,
                status: response.status,
            });
        }
        Ok(response)
    }

    /// `<vin base>/<VIN>?format=json[&modelyear=<year>]`
    fn vin_url(&self, vin: &str, model_year: Option<&str>) -> Url {
        let mut url = self.endpoints.vin.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(vin);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "json");
            if let Some(year) = model_year {
                query.append_pair("modelyear", year);
            }
        }
        url
    }

    /// `<plate url>?plate=<P>&state=<J>&format=json&key=<K>`
    fn plate_url(&self, plate: &str, jurisdiction: &str, key: &str) -> Url {
        let mut url = self.endpoints.plate.clone();
        url.query_pairs_mut()
            .append_pair("plate", plate)
            .append_pair("state", jurisdiction)
            .append_pair("format", "json")
            .append_pair("key", key);
        url
    }
}

/// Parse an upstream body into a flat attribute map.
///
/// VIN service bodies of the form `{"Results": [{...}], ...}` are unwrapped to
/// their first result; other bodies must already be a JSON object.
fn parse_attributes(
    provider: Provider,
    response: UpstreamResponse,
) -> Result<Map<String, Value>, DecodeError> {
    let malformed = |reason: String| DecodeError::MalformedResponse { provider, reason };

    let body: Value = serde_json::from_slice(&response.body)
        .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    let body = match body {
        Value::Object(mut map) if provider == Provider::Vin => match map.remove("Results") {
            Some(Value::Array(results)) => results
                .into_iter()
                .next()
                .ok_or_else(|| malformed("empty Results array".to_string()))?,
            Some(other) => {
                map.insert("Results".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    };

    match body {
        Value::Object(map) => Ok(map),
        other => Err(malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
