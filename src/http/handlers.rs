//! Route handlers.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::decode::{DecodeQuery, DecodeRequest, DecodeResult, VehicleSummary};
use crate::http::index::INDEX_HTML;
use crate::http::request::{DecodeInput, InputRejection};
use crate::http::response::VehicleResponse;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub plate_decoding: bool,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        plate_decoding: state.decoder.credential().is_configured(),
    })
}

/// `POST /decode`: VIN or plate decode, always answered with a `DecodeResult`.
pub async fn decode(
    State(state): State<AppState>,
    DecodeInput(request): DecodeInput<DecodeRequest>,
) -> DecodeResult {
    state.decoder.decode(&request).await
}

/// `POST /decode/vehicle`: VIN decode condensed into a [`VehicleSummary`].
pub async fn decode_vehicle(
    State(state): State<AppState>,
    input: Result<DecodeInput<DecodeRequest>, InputRejection>,
) -> Response {
    let request = match input {
        Ok(DecodeInput(request)) => DecodeRequest {
            vin: request.vin,
            model_year: request.model_year,
            ..DecodeRequest::default()
        },
        Err(rejection) => return VehicleResponse::bad_input(rejection).into_response(),
    };

    let vin = match request.classify() {
        DecodeQuery::Vin { vin, .. } => vin,
        _ => return VehicleResponse::missing_vin().into_response(),
    };

    match state.decoder.decode(&request).await {
        DecodeResult {
            success: true,
            data: Some(attributes),
            ..
        } => VehicleResponse::car(VehicleSummary::from_attributes(&vin, &attributes)).into_response(),
        DecodeResult { error, .. } => {
            VehicleResponse::upstream_failure(error.unwrap_or_else(|| "decode failed".to_string()))
                .into_response()
        }
    }
}
