//! Decode subsystem.
//!
//! # Data Flow
//! ```text
//! DecodeRequest (form / JSON body)
//!     → types.rs (classify: VIN | plate | invalid)
//!     → router.rs (build upstream URL, one call via transport.rs)
//!     → router.rs (status + JSON checks, vPIC Results unwrapping)
//!     → DecodeResult { success, data | error }
//! ```
//!
//! # Design Decisions
//! - VIN takes precedence when both a VIN and a plate are supplied
//! - Invalid input and a missing API key are answered without any network call
//! - Every failure is reported in the result; nothing here is fatal

pub mod error;
pub mod router;
pub mod transport;
pub mod types;
pub mod vehicle;

pub use error::DecodeError;
pub use router::{DecodeRouter, EndpointError, ProviderEndpoints};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, UpstreamResponse};
pub use types::{DecodeQuery, DecodeRequest, DecodeResult, Provider, ProviderCredential};
pub use vehicle::VehicleSummary;
