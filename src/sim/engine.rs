//! Simulation engine that steps a power model over a time range.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::error::SimError;
use crate::plant::PowerModel;

use super::clock::Clock;
use super::types::{SimRequest, SimulationResult, SimulationSample};

/// Upper bound on the up-front reservation; longer runs grow the buffer.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Simulation engine owning the power model.
///
/// Generic over `M: PowerModel` for static dispatch. Holds no state
/// between runs, so repeated runs with equal inputs give equal outputs.
#[derive(Debug, Clone)]
pub struct Engine<M: PowerModel> {
    model: M,
}

impl<M: PowerModel> Engine<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Evaluates the model at one instant.
    pub fn step(&self, timestamp: NaiveDateTime) -> SimulationSample {
        SimulationSample {
            timestamp,
            power_kw: self.model.power_kw(timestamp),
        }
    }

    /// Samples `[start, start + duration_hours]` every `interval_minutes`.
    ///
    /// The end instant is included when it falls on a step boundary, so a
    /// run yields `floor(duration_hours * 60 / interval_minutes) + 1` samples.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidParameter` if `interval_minutes <= 0`,
    /// `duration_hours < 0`, or the window overflows the calendar.
    pub fn run(
        &self,
        start: NaiveDateTime,
        duration_hours: i64,
        interval_minutes: i64,
    ) -> Result<SimulationResult, SimError> {
        if interval_minutes <= 0 {
            return Err(SimError::InvalidParameter {
                name: "interval_minutes",
                reason: format!("must be > 0, got {interval_minutes}"),
            });
        }
        if duration_hours < 0 {
            return Err(SimError::InvalidParameter {
                name: "duration_hours",
                reason: format!("must be >= 0, got {duration_hours}"),
            });
        }

        let end = TimeDelta::try_hours(duration_hours)
            .and_then(|span| start.checked_add_signed(span))
            .ok_or_else(|| SimError::InvalidParameter {
                name: "duration_hours",
                reason: format!("{duration_hours} h from {start} is out of range"),
            })?;
        let step = TimeDelta::try_minutes(interval_minutes).ok_or_else(|| {
            SimError::InvalidParameter {
                name: "interval_minutes",
                reason: format!("{interval_minutes} min is out of range"),
            }
        })?;

        let mut clock = Clock::new(start, end, step)?;
        debug!(%start, %end, interval_minutes, steps = clock.remaining(), "running simulation");

        let mut samples = Vec::with_capacity(clock.remaining().min(MAX_PREALLOCATED_SAMPLES));
        clock.run(|t| samples.push(self.step(t)));

        debug!(samples = samples.len(), "simulation complete");
        Ok(SimulationResult::new(samples))
    }

    /// Runs a resolved [`SimRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`Engine::run`].
    pub fn run_request(&self, request: &SimRequest) -> Result<SimulationResult, SimError> {
        self.run(
            request.start,
            request.duration_hours,
            request.interval_minutes,
        )
    }
}

/// Simulates `model` over `[start, start + duration_hours]`.
///
/// Shorthand for `Engine::new(model).run(..)` that borrows the model.
///
/// # Errors
///
/// Returns `SimError::InvalidParameter` for a non-positive interval or a
/// negative duration.
pub fn simulate<M: PowerModel>(
    model: &M,
    start: NaiveDateTime,
    duration_hours: i64,
    interval_minutes: i64,
) -> Result<SimulationResult, SimError> {
    Engine::new(model).run(start, duration_hours, interval_minutes)
}
