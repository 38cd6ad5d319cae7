//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Country, CountryCode, RadioStation};
use crate::service::{DEFAULT_STATION_LIMIT, MAX_STATION_LIMIT};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/", get(welcome))
        .route("/api/countries", get(list_countries))
        .route("/api/stations/:id", get(list_stations))
        .route("/api/stations/:id/validate", get(validate_station))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Global Radio API - Ready to stream the world!",
    })
}

/// Countries with stations. Never fails: upstream trouble yields the
/// fallback list.
async fn list_countries(State(state): State<AppState>) -> Json<Vec<Country>> {
    let countries = state.radio.get_countries().await;
    Json(countries.as_ref().clone())
}

/// Stations for a country code, e.g. `/api/stations/de?limit=20`.
async fn list_stations(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<Vec<RadioStation>>, AppError> {
    let country = CountryCode::parse_normalized(&code).map_err(|e| AppError::BadRequest {
        message: format!("Country code must be 2 letters ({e}): {code}"),
    })?;
    let limit = clamp_limit(query.limit);

    let stations = state.radio.get_stations_by_country(country, limit).await;
    Ok(Json(stations.as_ref().clone()))
}

/// Stream validation is not implemented; every station is reported working.
async fn validate_station(Path(_id): Path<String>) -> Json<ValidateStationResponse> {
    Json(ValidateStationResponse {
        valid: true,
        status: "working",
        last_checked: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Map a requested limit onto `1..=MAX_STATION_LIMIT`.
///
/// Missing or non-positive values mean "default", oversized ones are capped.
pub fn clamp_limit(requested: Option<i64>) -> u16 {
    match requested {
        Some(n) if n > i64::from(MAX_STATION_LIMIT) => MAX_STATION_LIMIT,
        Some(n) if n >= 1 => n as u16,
        _ => DEFAULT_STATION_LIMIT,
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
