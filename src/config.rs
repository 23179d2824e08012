//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::frequency::Frequency;
use crate::plant::{Location, Plant, PlantSpecs};
use crate::timeseries::parse_datetime;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the New York reference plant. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::nyc`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Plant site.
    #[serde(default)]
    pub location: LocationConfig,
    /// Panel array parameters.
    #[serde(default)]
    pub plant: PlantConfig,
    /// Simulated window and sampling frequency.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Plant site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Elevation in meters (carried but not used by the model).
    pub elevation: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            elevation: 10.0,
        }
    }
}

/// Panel array parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Nameplate capacity (kW, > 0).
    pub capacity_kw: f64,
    /// Tilt from horizontal (degrees, 0 to 90).
    pub tilt_angle: f64,
    /// Facing direction, clockwise from north (degrees, 0 to 360).
    pub azimuth_angle: f64,
    /// Conversion efficiency (0.0 to 1.0).
    pub efficiency: f64,
    /// Fractional power change per °C.
    pub temperature_coefficient: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            capacity_kw: 1000.0,
            tilt_angle: 30.0,
            azimuth_angle: 180.0,
            efficiency: 0.18,
            temperature_coefficient: PlantSpecs::DEFAULT_TEMPERATURE_COEFFICIENT,
        }
    }
}

/// Simulated window and sampling frequency.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// First sampled instant, local wall-clock (`YYYY-MM-DD[THH:MM[:SS]]`).
    pub start: String,
    /// Last instant of the window (inclusive when on a step boundary).
    pub end: String,
    /// Frequency label: `"1h"`, `"15min"`, `"1D"`, ...
    pub freq: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: "2024-03-20T00:00:00".to_string(),
            end: "2024-03-27T00:00:00".to_string(),
            freq: "1h".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"plant.capacity_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the New York reference plant: 1 MW, 30° tilt, south facing,
    /// hourly over the week after the March equinox.
    pub fn nyc() -> Self {
        Self::default()
    }

    /// Returns a southern-hemisphere plant facing north (Sydney).
    pub fn sydney() -> Self {
        Self {
            location: LocationConfig {
                latitude: -33.8688,
                longitude: 151.2093,
                elevation: 58.0,
            },
            plant: PlantConfig {
                capacity_kw: 250.0,
                tilt_angle: 34.0,
                azimuth_angle: 0.0,
                efficiency: 0.20,
                ..PlantConfig::default()
            },
            simulation: SimulationConfig {
                start: "2024-12-21T00:00:00".to_string(),
                end: "2024-12-22T00:00:00".to_string(),
                freq: "15min".to_string(),
            },
        }
    }

    /// Returns a flat rooftop array on the equator.
    pub fn equator() -> Self {
        Self {
            location: LocationConfig {
                latitude: 0.0,
                longitude: 0.0,
                elevation: 0.0,
            },
            plant: PlantConfig {
                capacity_kw: 50.0,
                tilt_angle: 0.0,
                efficiency: PlantSpecs::DEFAULT_EFFICIENCY,
                ..PlantConfig::default()
            },
            simulation: SimulationConfig {
                start: "2024-01-01T00:00:00".to_string(),
                end: "2024-12-31T00:00:00".to_string(),
                freq: "1D".to_string(),
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["nyc", "sydney", "equator"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "nyc" => Ok(Self::nyc()),
            "sydney" => Ok(Self::sydney()),
            "equator" => Ok(Self::equator()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds the plant described by `[location]` and `[plant]`.
    pub fn plant(&self) -> Plant {
        let loc = &self.location;
        let p = &self.plant;
        Plant::new(
            Location::new(loc.latitude, loc.longitude).with_elevation(loc.elevation),
            PlantSpecs::new(p.capacity_kw, p.tilt_angle, p.azimuth_angle)
                .with_efficiency(p.efficiency)
                .with_temperature_coefficient(p.temperature_coefficient),
        )
    }

    /// Parsed `(start, end)` of the simulated window.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the timestamp that does not parse.
    pub fn window(&self) -> Result<(NaiveDateTime, NaiveDateTime), ConfigError> {
        let s = &self.simulation;
        let start = parse_datetime(&s.start)
            .map_err(|e| ConfigError::new("simulation.start", e.to_string()))?;
        let end =
            parse_datetime(&s.end).map_err(|e| ConfigError::new("simulation.end", e.to_string()))?;
        Ok((start, end))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let loc = &self.location;
        if !(-90.0..=90.0).contains(&loc.latitude) {
            errors.push(ConfigError::new("location.latitude", "must be in [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&loc.longitude) {
            errors.push(ConfigError::new("location.longitude", "must be in [-180, 180]"));
        }
        if !loc.elevation.is_finite() {
            errors.push(ConfigError::new("location.elevation", "must be finite"));
        }

        let p = &self.plant;
        if !(p.capacity_kw > 0.0 && p.capacity_kw.is_finite()) {
            errors.push(ConfigError::new("plant.capacity_kw", "must be > 0"));
        }
        if !(0.0..=90.0).contains(&p.tilt_angle) {
            errors.push(ConfigError::new("plant.tilt_angle", "must be in [0, 90]"));
        }
        if !(0.0..360.0).contains(&p.azimuth_angle) {
            errors.push(ConfigError::new("plant.azimuth_angle", "must be in [0, 360)"));
        }
        if !(p.efficiency > 0.0 && p.efficiency <= 1.0) {
            errors.push(ConfigError::new("plant.efficiency", "must be in (0, 1]"));
        }
        if !p.temperature_coefficient.is_finite() {
            errors.push(ConfigError::new("plant.temperature_coefficient", "must be finite"));
        }

        let s = &self.simulation;
        if let Err(e) = Frequency::parse(&s.freq) {
            errors.push(ConfigError::new("simulation.freq", e.to_string()));
        }
        let start = parse_datetime(&s.start);
        let end = parse_datetime(&s.end);
        match (&start, &end) {
            (Ok(start), Ok(end)) if end < start => {
                errors.push(ConfigError::new("simulation.end", "must not be before simulation.start"));
            }
            _ => {}
        }
        if let Err(e) = start {
            errors.push(ConfigError::new("simulation.start", e.to_string()));
        }
        if let Err(e) = end {
            errors.push(ConfigError::new("simulation.end", e.to_string()));
        }

        errors
    }
}
