//! Vehicle decoder library.
//!
//! Relays VIN and license plate lookups to external decoding services and
//! returns their attributes as JSON.

pub mod config;
pub mod decode;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::DecoderConfig;
pub use decode::{DecodeRequest, DecodeResult, DecodeRouter};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
