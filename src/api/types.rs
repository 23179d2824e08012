//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::types::{SimulationSample, TIMESTAMP_FORMAT};

/// Single row of a simulated series, using CSV export field names.
#[derive(Debug, Serialize)]
pub struct TimeSeriesRecord {
    /// Sample instant, `YYYY-MM-DD HH:MM:SS`.
    pub datetime: String,
    /// Output power (kW).
    pub power_kw: f64,
}

impl From<&SimulationSample> for TimeSeriesRecord {
    fn from(s: &SimulationSample) -> Self {
        Self {
            datetime: s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            power_kw: s.power_kw,
        }
    }
}

/// Optional window overrides for the series endpoints.
///
/// Any missing field falls back to the scenario window.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    /// First sampled instant.
    pub start: Option<String>,
    /// Last instant of the window.
    pub end: Option<String>,
    /// Frequency label.
    pub freq: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
