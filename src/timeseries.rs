//! Date-range requests and the `power_kw` table returned for them.
//!
//! Turns a `(start, end, frequency label)` request into the driver's
//! `(start, duration_hours, interval_minutes)` triple and packages the
//! samples as a time-indexed series.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, ValidationError};
use crate::frequency::Frequency;
use crate::plant::PowerModel;
use crate::sim::engine::Engine;
use crate::sim::kpi::SeriesSummary;
use crate::sim::types::{SimRequest, SimulationResult, SimulationSample};

/// Name of the only value column.
pub const POWER_COLUMN: &str = "power_kw";

/// Largest series a single request may produce (about two years at 1min).
pub const MAX_SAMPLES: usize = 1_000_000;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]`.
///
/// A bare date means midnight.
///
/// # Errors
///
/// Returns `ValidationError::InvalidTimestamp` if no layout matches.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::InvalidTimestamp(text.to_string()))
}

/// Resolves a date range and frequency label into driver arguments.
///
/// The duration is the whole number of hours between `start` and `end`,
/// truncated, so a trailing partial hour is not sampled.
///
/// # Errors
///
/// Returns `ValidationError::EndBeforeStart` if `end < start`,
/// `ValidationError::UnknownFrequency` for an unrecognized label and
/// `ValidationError::WindowTooLarge` past [`MAX_SAMPLES`].
pub fn resolve_request(
    start: NaiveDateTime,
    end: NaiveDateTime,
    freq: &str,
) -> Result<(SimRequest, Frequency), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    let frequency = Frequency::parse(freq)?;
    let duration_hours = (end - start).num_hours();
    let request = SimRequest::new(start, duration_hours, frequency.minutes());
    let samples = request.expected_samples().unwrap_or(usize::MAX);
    if samples > MAX_SAMPLES {
        return Err(ValidationError::WindowTooLarge {
            samples,
            max: MAX_SAMPLES,
        });
    }
    Ok((request, frequency))
}

/// A simulated power series indexed by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Sampling frequency of the index.
    pub freq: Frequency,
    /// Nameplate capacity of the simulated plant (kW).
    pub capacity_kw: f64,
    #[serde(rename = "records")]
    result: SimulationResult,
}

impl TimeSeries {
    pub fn new(result: SimulationResult, freq: Frequency, capacity_kw: f64) -> Self {
        Self {
            freq,
            capacity_kw,
            result,
        }
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Column names, in order.
    pub fn columns(&self) -> &'static [&'static str] {
        &[POWER_COLUMN]
    }

    pub fn index(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.result.iter().map(|s| s.timestamp)
    }

    pub fn power_kw(&self) -> impl Iterator<Item = f64> + '_ {
        self.result.power_kw()
    }

    pub fn rows(&self) -> &[SimulationSample] {
        self.result.samples()
    }

    /// First `n` rows (all rows if fewer).
    pub fn head(&self, n: usize) -> &[SimulationSample] {
        let rows = self.rows();
        &rows[..n.min(rows.len())]
    }

    /// Power at `timestamp`, if it is on the index.
    pub fn get(&self, timestamp: NaiveDateTime) -> Option<f64> {
        let rows = self.rows();
        rows.binary_search_by_key(&timestamp, |s| s.timestamp)
            .ok()
            .map(|i| rows[i].power_kw)
    }

    pub fn summary(&self) -> SeriesSummary {
        let interval_hours = self.freq.minutes() as f64 / 60.0;
        SeriesSummary::from_samples(self.rows(), interval_hours, self.capacity_kw)
    }

    pub fn into_result(self) -> SimulationResult {
        self.result
    }
}

/// Simulates `model` from `start` to `end` at `freq` and returns the table.
///
/// # Errors
///
/// Returns `Error::Validation` for a bad range or frequency label. The
/// driver errors are unreachable for a validated request but still
/// propagate as `Error::Simulation`.
pub fn generate_timeseries<M: PowerModel>(
    model: &M,
    start: NaiveDateTime,
    end: NaiveDateTime,
    freq: &str,
) -> Result<TimeSeries, Error> {
    let (request, frequency) = resolve_request(start, end, freq)?;
    info!(%start, %end, freq = %frequency, "generating time series");
    let result = Engine::new(model).run_request(&request)?;
    Ok(TimeSeries::new(result, frequency, model.capacity_kw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::{Location, Plant, PlantSpecs};
    use chrono::TimeDelta;

    fn dt(text: &str) -> NaiveDateTime {
        parse_datetime(text).expect("valid test timestamp")
    }

    fn plant() -> Plant {
        Plant::new(
            Location::new(40.7128, -74.0060),
            PlantSpecs::new(1000.0, 30.0, 180.0),
        )
    }

    #[test]
    fn parses_supported_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 20)
            .and_then(|d| d.and_hms_opt(6, 30, 0))
            .expect("valid date");
        assert_eq!(parse_datetime("2024-03-20T06:30:00"), Ok(expected));
        assert_eq!(parse_datetime("2024-03-20 06:30:00"), Ok(expected));
        assert_eq!(parse_datetime("2024-03-20T06:30"), Ok(expected));
        assert_eq!(parse_datetime("2024-03-20 06:30"), Ok(expected));
        assert_eq!(
            parse_datetime("2024-03-20"),
            Ok(expected - TimeDelta::minutes(6 * 60 + 30))
        );
    }

    #[test]
    fn rejects_malformed_timestamp() {
        assert_eq!(
            parse_datetime("20/03/2024"),
            Err(ValidationError::InvalidTimestamp("20/03/2024".into()))
        );
        assert!(parse_datetime("2024-02-30").is_err());
    }

    #[test]
    fn hourly_over_a_day_without_endpoint_hour() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-20 23:00"), "1H")
            .expect("valid request");
        assert_eq!(ts.len(), 24);
        assert_eq!(ts.columns(), &["power_kw"]);
        assert_eq!(ts.freq.to_string(), "1h");
        assert!(ts.power_kw().all(|p| (0.0..=1000.0).contains(&p)));
    }

    #[test]
    fn quarter_hourly_over_one_hour() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-20 01:00"), "15min")
            .expect("valid request");
        assert_eq!(ts.len(), 5);
        assert_eq!(ts.freq.to_string(), "15min");
        let index: Vec<_> = ts.index().collect();
        assert_eq!(index[4], dt("2024-03-20 01:00"));
    }

    #[test]
    fn daily_over_a_week_is_inclusive() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-27"), "1D")
            .expect("valid request");
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.freq.to_string(), "1D");
    }

    #[test]
    fn invalid_frequency() {
        let err = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-21"), "invalid");
        assert_eq!(
            err,
            Err(Error::Validation(ValidationError::UnknownFrequency(
                "invalid".into()
            )))
        );
    }

    #[test]
    fn end_before_start() {
        let err = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-19"), "1H");
        assert!(matches!(
            err,
            Err(Error::Validation(ValidationError::EndBeforeStart { .. }))
        ));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let err = generate_timeseries(&plant(), dt("0001-01-01"), dt("9999-12-31"), "1min");
        assert!(matches!(
            err,
            Err(Error::Validation(ValidationError::WindowTooLarge { max: MAX_SAMPLES, .. }))
        ));
    }

    #[test]
    fn window_at_the_limit_is_accepted() {
        // 4 samples per hour plus the inclusive end
        let (req, _) = resolve_request(dt("2000-01-01"), dt("2000-01-01") + TimeDelta::hours(249_999), "15min")
            .expect("under the limit");
        assert_eq!(req.expected_samples(), Some(999_997));

        let over = resolve_request(dt("2000-01-01"), dt("2000-01-01") + TimeDelta::hours(250_000), "15min");
        assert_eq!(
            over.map(|_| ()),
            Err(ValidationError::WindowTooLarge {
                samples: 1_000_001,
                max: MAX_SAMPLES
            })
        );
    }

    #[test]
    fn partial_hour_is_truncated() {
        let (req, _) = resolve_request(dt("2024-03-20"), dt("2024-03-20 02:59"), "1h")
            .expect("valid request");
        assert_eq!(req.duration_hours, 2);
        assert_eq!(req.interval_minutes, 60);
    }

    #[test]
    fn equal_endpoints_give_single_row() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20 12:00"), dt("2024-03-20 12:00"), "1h")
            .expect("valid request");
        assert_eq!(ts.len(), 1);
        assert!(ts.get(dt("2024-03-20 12:00")).is_some_and(|p| p > 0.0));
    }

    #[test]
    fn head_and_lookup() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-21"), "1h")
            .expect("valid request");
        assert_eq!(ts.head(5).len(), 5);
        assert_eq!(ts.head(100).len(), 25);
        assert_eq!(ts.get(dt("2024-03-20 00:00")), Some(0.0));
        assert_eq!(ts.get(dt("2024-03-20 00:30")), None);
    }

    #[test]
    fn summary_uses_frequency_for_energy() {
        let ts = generate_timeseries(&plant(), dt("2024-03-20"), dt("2024-03-21"), "1h")
            .expect("valid request");
        let summary = ts.summary();
        let total: f64 = ts.power_kw().sum();
        assert_eq!(summary.count, 25);
        assert!((summary.energy_kwh - total).abs() < 1e-9);
        assert!(summary.producing_samples > 0 && summary.producing_samples < 25);
    }
}
