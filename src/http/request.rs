//! Request handling.
//!
//! # Responsibilities
//! - Request ID header name and span construction for the trace layer
//! - Accept decode input as either a form or a JSON body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Malformed bodies become a 400 carrying a JSON error, never a plain-text rejection

use axum::{
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::Span;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation ID of a request, or `"unknown"` before the ID layer ran.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for one inbound request. Only the path is recorded, never the query.
pub fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request.headers()),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Decode input read from `application/json` or `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct DecodeInput<T>(pub T);

/// Why an inbound body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRejection {
    pub status: StatusCode,
    pub message: String,
}

impl InputRejection {
    fn new(status: StatusCode, message: String) -> Self {
        // Oversized bodies keep 413; everything else is a plain bad request.
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self { status, message }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S, T> FromRequest<S> for DecodeInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = InputRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| InputRejection::new(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| InputRejection::new(e.status(), e.body_text()))?;
            Ok(Self(value))
        }
    }
}
