//! Response construction.
//!
//! # Responsibilities
//! - Render decode results as JSON
//! - Map handled decode failures to 200, unreadable input to 400/413
//! - Render the vehicle summary endpoint's `{"car": ...}` / `{"error": ...}` bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::decode::{DecodeResult, VehicleSummary};
use crate::http::request::InputRejection;

// Handled failures are reported in the body; the status stays 200.
impl IntoResponse for DecodeResult {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl IntoResponse for InputRejection {
    fn into_response(self) -> Response {
        let body = DecodeResult::failed(format!("malformed request: {}", self.message));
        (self.status, Json(body)).into_response()
    }
}

/// Body of `POST /decode/vehicle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VehicleResponse {
    Car { car: VehicleSummary },
    Error { error: String },
}

impl VehicleResponse {
    pub fn car(car: VehicleSummary) -> (StatusCode, Self) {
        (StatusCode::OK, Self::Car { car })
    }

    pub fn missing_vin() -> (StatusCode, Self) {
        (
            StatusCode::BAD_REQUEST,
            Self::Error {
                error: "Please provide a VIN.".to_string(),
            },
        )
    }

    pub fn bad_input(rejection: InputRejection) -> (StatusCode, Self) {
        (
            rejection.status,
            Self::Error {
                error: format!("malformed request: {}", rejection.message),
            },
        )
    }

    pub fn upstream_failure(error: impl Into<String>) -> (StatusCode, Self) {
        (
            StatusCode::BAD_GATEWAY,
            Self::Error {
                error: error.into(),
            },
        )
    }
}

impl IntoResponse for VehicleResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
