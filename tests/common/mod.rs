//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use solar_sim::plant::{Location, Plant, PlantSpecs};
use solar_sim::timeseries::parse_datetime;

/// New York site (40.7128 N, 74.0060 W, sea level).
pub fn nyc() -> Location {
    Location::new(40.7128, -74.0060)
}

/// 1 MW array, 30° tilt, facing south, default efficiency.
pub fn default_specs() -> PlantSpecs {
    PlantSpecs::new(1000.0, 30.0, 180.0)
}

/// Default plant: the 1 MW array in New York.
pub fn default_plant() -> Plant {
    Plant::new(nyc(), default_specs())
}

/// Parses a fixture timestamp, panicking on malformed test input.
pub fn dt(text: &str) -> NaiveDateTime {
    parse_datetime(text).expect("valid fixture timestamp")
}
