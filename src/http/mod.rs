//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, body limit)
//!     → request.rs (form or JSON body → DecodeRequest)
//!     → handlers.rs (decode router call)
//!     → response.rs (DecodeResult / VehicleResponse → JSON)
//!     → Send to client
//! ```

pub mod handlers;
pub mod index;
pub mod request;
pub mod response;
pub mod server;

pub use request::{DecodeInput, InputRejection, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
