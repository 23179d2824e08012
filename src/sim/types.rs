//! Simulation inputs and outputs.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used for printed and exported rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Driver arguments resolved from a user-facing request.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solar_sim::sim::types::SimRequest;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 20)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let req = SimRequest::new(start, 24, 60);
/// assert_eq!(req.expected_samples(), Some(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimRequest {
    /// First sampled instant.
    pub start: NaiveDateTime,
    /// Length of the simulated window in whole hours (must be >= 0).
    pub duration_hours: i64,
    /// Distance between samples in minutes (must be > 0).
    pub interval_minutes: i64,
}

impl SimRequest {
    pub fn new(start: NaiveDateTime, duration_hours: i64, interval_minutes: i64) -> Self {
        Self {
            start,
            duration_hours,
            interval_minutes,
        }
    }

    /// Sample count the driver will produce, or `None` for invalid arguments.
    pub fn expected_samples(&self) -> Option<usize> {
        if self.duration_hours < 0 || self.interval_minutes <= 0 {
            return None;
        }
        let steps = self.duration_hours.checked_mul(60)? / self.interval_minutes;
        usize::try_from(steps).ok().map(|n| n + 1)
    }

    /// Step length in hours.
    pub fn interval_hours(&self) -> f64 {
        self.interval_minutes as f64 / 60.0
    }
}

/// One simulated instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationSample {
    pub timestamp: NaiveDateTime,
    /// Output power in kW, within `[0, capacity_kw]`.
    pub power_kw: f64,
}

impl fmt::Display for SimulationSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:>12.4}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.power_kw
        )
    }
}

/// Samples of one simulation run, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationResult {
    samples: Vec<SimulationSample>,
}

impl SimulationResult {
    /// Wraps samples that are already in ascending timestamp order.
    pub fn new(samples: Vec<SimulationSample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[SimulationSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationSample> {
        self.samples.iter()
    }

    /// Power column in timestamp order.
    pub fn power_kw(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.power_kw)
    }

    pub fn into_samples(self) -> Vec<SimulationSample> {
        self.samples
    }
}

impl IntoIterator for SimulationResult {
    type Item = SimulationSample;
    type IntoIter = std::vec::IntoIter<SimulationSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a SimulationResult {
    type Item = &'a SimulationSample;
    type IntoIter = std::slice::Iter<'a, SimulationSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
