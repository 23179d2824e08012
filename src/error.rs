//! Error types for the simulation core and the request layer around it.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by the simulation driver itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A stepping parameter would make the loop empty or endless.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending argument.
        name: &'static str,
        /// Human-readable constraint description.
        reason: String,
    },
}

/// User-facing request validation errors, raised before the core runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("unrecognized frequency label \"{0}\" (expected e.g. \"1h\", \"15min\", \"1D\")")]
    UnknownFrequency(String),
    #[error("cannot parse \"{0}\" as a date-time (expected YYYY-MM-DD[THH:MM[:SS]])")]
    InvalidTimestamp(String),
    #[error("window of {samples} samples exceeds the limit of {max}")]
    WindowTooLarge { samples: usize, max: usize },
}

/// Any failure of [`crate::timeseries::generate_timeseries`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Simulation(#[from] SimError),
}
