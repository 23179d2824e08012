//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, TimeSeriesRecord, WindowQuery};
use crate::plant::Plant;
use crate::sim::kpi::SeriesSummary;
use crate::timeseries::{TimeSeries, generate_timeseries, parse_datetime};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl ToString) -> ApiError {
    let error = error.to_string();
    warn!(%error, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Simulates the query window, falling back to the state defaults.
fn simulate_window(state: &AppState, query: &WindowQuery) -> Result<TimeSeries, ApiError> {
    let start = query.start.as_deref().unwrap_or(&state.start);
    let end = query.end.as_deref().unwrap_or(&state.end);
    let freq = query.freq.as_deref().unwrap_or(&state.freq);

    let start = parse_datetime(start).map_err(bad_request)?;
    let end = parse_datetime(end).map_err(bad_request)?;
    generate_timeseries(&state.plant, start, end, freq).map_err(bad_request)
}

/// Returns the plant location and specs.
///
/// `GET /plant` → 200 + `Plant` JSON
pub async fn get_plant(State(state): State<Arc<AppState>>) -> Json<Plant> {
    Json(state.plant)
}

/// Returns simulated records for the requested window.
///
/// `GET /timeseries` → 200 + `Vec<TimeSeriesRecord>` JSON for the default window
/// `GET /timeseries?start=..&end=..&freq=..` → overridden window
/// `GET /timeseries?freq=weekly` → 400 + `ErrorResponse`
pub async fn get_timeseries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<TimeSeriesRecord>>, ApiError> {
    let series = simulate_window(&state, &query)?;
    Ok(Json(
        series.rows().iter().map(TimeSeriesRecord::from).collect(),
    ))
}

/// Returns summary statistics for the requested window.
///
/// `GET /summary` → 200 + `SeriesSummary` JSON, same window rules as `/timeseries`
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<SeriesSummary>, ApiError> {
    let series = simulate_window(&state, &query)?;
    Ok(Json(series.summary()))
}
