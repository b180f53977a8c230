//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DecoderConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the plate decoding service API key.
pub const API_KEY_ENV: &str = "PLATE_DECODER_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DecoderConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: DecoderConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the startup configuration: file (or defaults), then environment
/// overrides, then validation.
pub fn load_startup_config<F>(path: Option<&Path>, lookup: F) -> Result<DecoderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: DecoderConfig = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => DecoderConfig::default(),
    };

    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` as the variable source.
///
/// A blank `PLATE_DECODER_API_KEY` clears the key.
pub fn apply_env_overrides<F>(config: &mut DecoderConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV) {
        let key = key.trim();
        config.providers.api_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
    }
}
