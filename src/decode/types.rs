//! Request, query and result types for the decode router.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::decode::error::DecodeError;

/// Raw decode input as submitted by a client.
///
/// Every field is optional; [`DecodeRequest::classify`] decides which
/// provider, if any, the request is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecodeRequest {
    pub vin: Option<String>,

    /// Optional model year, forwarded to the VIN service.
    #[serde(alias = "year", alias = "modelyear")]
    pub model_year: Option<String>,

    pub plate: Option<String>,

    /// Issuing state or province of the plate.
    #[serde(alias = "state")]
    pub jurisdiction: Option<String>,
}

impl DecodeRequest {
    pub fn vin(vin: impl Into<String>) -> Self {
        Self {
            vin: Some(vin.into()),
            ..Self::default()
        }
    }

    pub fn plate(plate: impl Into<String>, jurisdiction: impl Into<String>) -> Self {
        Self {
            plate: Some(plate.into()),
            jurisdiction: Some(jurisdiction.into()),
            ..Self::default()
        }
    }

    pub fn with_model_year(mut self, year: impl Into<String>) -> Self {
        self.model_year = Some(year.into());
        self
    }

    /// Select the provider for this request. A VIN takes precedence over a plate.
    pub fn classify(&self) -> DecodeQuery {
        if let Some(vin) = normalized(&self.vin) {
            return DecodeQuery::Vin {
                vin,
                model_year: self
                    .model_year
                    .as_deref()
                    .map(str::trim)
                    .filter(|y| !y.is_empty())
                    .map(str::to_string),
            };
        }

        match (normalized(&self.plate), normalized(&self.jurisdiction)) {
            (Some(plate), Some(jurisdiction)) => DecodeQuery::Plate { plate, jurisdiction },
            _ => DecodeQuery::Invalid,
        }
    }
}

/// Trimmed, upper-cased value, or `None` when absent or blank.
fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_ascii_uppercase)
}

/// A classified decode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeQuery {
    Vin {
        vin: String,
        model_year: Option<String>,
    },
    Plate {
        plate: String,
        jurisdiction: String,
    },
    Invalid,
}

impl DecodeQuery {
    /// Provider label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DecodeQuery::Vin { .. } => Provider::Vin.label(),
            DecodeQuery::Plate { .. } => Provider::Plate.label(),
            DecodeQuery::Invalid => "none",
        }
    }
}

/// Upstream decoding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Vin,
    Plate,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Vin => "vin",
            Provider::Plate => "plate",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Vin => write!(f, "VIN decoding service"),
            Provider::Plate => write!(f, "plate decoding service"),
        }
    }
}

/// API key for the plate decoding service, fixed for the process lifetime.
///
/// An empty or whitespace-only key counts as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredential(Option<String>);

impl ProviderCredential {
    pub fn new(key: Option<String>) -> Self {
        Self(key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn key(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }
}

impl std::fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(_) => write!(f, "ProviderCredential(<redacted>)"),
            None => write!(f, "ProviderCredential(None)"),
        }
    }
}

/// Outcome of one decode, serialized as the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecodeResult {
    pub fn ok(data: Map<String, Value>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<Map<String, Value>, DecodeError>> for DecodeResult {
    fn from(result: Result<Map<String, Value>, DecodeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}
