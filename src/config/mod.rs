//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → DecoderConfig (validated, immutable)
//!     → consumed once at startup by the HTTP server and decode router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so the service runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_startup_config, ConfigError, API_KEY_ENV};
pub use schema::{
    DecoderConfig, ListenerConfig, ObservabilityConfig, ProviderConfig, SecurityConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
