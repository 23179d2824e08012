//! Clear-sky solar PV plant simulator.
//!
//! Computes sun position from date, time and location, turns it into
//! plane-of-array insolation and plant output, and steps a plant over a
//! date range at a fixed frequency.

pub mod config;
pub mod error;
pub mod frequency;
/// CSV export of simulated series.
pub mod io;
/// Plant description, solar geometry and the power model.
pub mod plant;
/// Fixed-interval simulation driver and run statistics.
pub mod sim;
pub mod timeseries;

#[cfg(feature = "api")]
pub mod api;

pub use error::{Error, SimError, ValidationError};
pub use frequency::Frequency;
pub use plant::{Location, Plant, PlantSpecs, PowerModel};
pub use timeseries::{TimeSeries, generate_timeseries};
