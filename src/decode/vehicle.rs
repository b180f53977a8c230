//! Condensed vehicle description built from vPIC attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A vehicle summary. Fields the upstream left blank are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VehicleSummary {
    /// Build a summary from a flat vPIC `DecodeVinValues` result.
    pub fn from_attributes(vin: &str, attributes: &Map<String, Value>) -> Self {
        let field = |name: &str| text(attributes, name);

        let engine = [
            field("EngineCylinders").map(|c| format!("{}-cyl", c)),
            field("DisplacementL").map(|d| format!("{}L", d)),
            field("FuelTypePrimary"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        Self {
            vin: Some(vin.to_string()).filter(|v| !v.is_empty()),
            year: field("ModelYear"),
            make: field("Make"),
            model: field("Model"),
            body_style: field("BodyClass"),
            engine: (!engine.is_empty()).then(|| engine.join(" ")),
            assembly: field("PlantCountry"),
            description: field("Series").or_else(|| field("Trim")),
        }
    }
}

/// Non-empty string value of `name`. Numbers are rendered as text.
fn text(attributes: &Map<String, Value>, name: &str) -> Option<String> {
    match attributes.get(name)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
