//! Plant value objects and the power-model contract used by the driver.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::irradiance;

/// Geographic site of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    /// Latitude in degrees, positive north (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees, positive east (-180 to 180).
    pub longitude: f64,
    /// Elevation above sea level in meters.
    ///
    /// Not read by the model yet; reserved for a pressure-corrected air mass.
    pub elevation: f64,
}

impl Location {
    /// Creates a location at sea level.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: 0.0,
        }
    }

    /// Returns a copy with the given elevation in meters.
    pub fn with_elevation(self, elevation: f64) -> Self {
        Self { elevation, ..self }
    }
}

/// Nameplate and orientation of the panel array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantSpecs {
    /// Nameplate capacity in kilowatts (> 0).
    pub capacity_kw: f64,
    /// Panel tilt from horizontal in degrees.
    pub tilt_angle: f64,
    /// Panel azimuth in degrees clockwise from north (180 = south).
    pub azimuth_angle: f64,
    /// Panel conversion efficiency (0.0 to 1.0).
    pub efficiency: f64,
    /// Fractional power change per °C away from 25 °C.
    pub temperature_coefficient: f64,
}

impl PlantSpecs {
    pub const DEFAULT_EFFICIENCY: f64 = 0.15;
    pub const DEFAULT_TEMPERATURE_COEFFICIENT: f64 = -0.0035;

    /// Creates specs with default efficiency and temperature coefficient.
    pub fn new(capacity_kw: f64, tilt_angle: f64, azimuth_angle: f64) -> Self {
        Self {
            capacity_kw,
            tilt_angle,
            azimuth_angle,
            efficiency: Self::DEFAULT_EFFICIENCY,
            temperature_coefficient: Self::DEFAULT_TEMPERATURE_COEFFICIENT,
        }
    }

    pub fn with_efficiency(self, efficiency: f64) -> Self {
        Self { efficiency, ..self }
    }

    pub fn with_temperature_coefficient(self, temperature_coefficient: f64) -> Self {
        Self {
            temperature_coefficient,
            ..self
        }
    }
}

/// Anything that maps a timestamp to an output power.
///
/// The simulation driver is generic over this trait so the stepping loop
/// does not depend on the irradiance model.
pub trait PowerModel {
    /// Output power in kilowatts at `timestamp`, within `[0, capacity_kw]`.
    fn power_kw(&self, timestamp: NaiveDateTime) -> f64;

    /// Upper bound of [`PowerModel::power_kw`].
    fn capacity_kw(&self) -> f64;
}

impl<M: PowerModel + ?Sized> PowerModel for &M {
    fn power_kw(&self, timestamp: NaiveDateTime) -> f64 {
        (**self).power_kw(timestamp)
    }

    fn capacity_kw(&self) -> f64 {
        (**self).capacity_kw()
    }
}

/// A fixed-tilt plant at one site. Holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plant {
    pub location: Location,
    pub specs: PlantSpecs,
}

impl Plant {
    pub fn new(location: Location, specs: PlantSpecs) -> Self {
        Self { location, specs }
    }
}

impl PowerModel for Plant {
    fn power_kw(&self, timestamp: NaiveDateTime) -> f64 {
        irradiance::power_kw(timestamp, &self.location, &self.specs)
    }

    fn capacity_kw(&self) -> f64 {
        self.specs.capacity_kw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_defaults_to_sea_level() {
        let loc = Location::new(40.7128, -74.0060);
        assert_eq!(loc.latitude, 40.7128);
        assert_eq!(loc.longitude, -74.0060);
        assert_eq!(loc.elevation, 0.0);
    }

    #[test]
    fn location_with_elevation() {
        let loc = Location::new(40.7128, -74.0060).with_elevation(100.0);
        assert_eq!(loc.elevation, 100.0);
    }

    #[test]
    fn specs_default_efficiency_and_coefficient() {
        let specs = PlantSpecs::new(1000.0, 30.0, 180.0);
        assert_eq!(specs.capacity_kw, 1000.0);
        assert_eq!(specs.tilt_angle, 30.0);
        assert_eq!(specs.azimuth_angle, 180.0);
        assert_eq!(specs.efficiency, 0.15);
        assert_eq!(specs.temperature_coefficient, -0.0035);
    }

    #[test]
    fn specs_custom_values() {
        let specs = PlantSpecs::new(500.0, 25.0, 175.0)
            .with_efficiency(0.20)
            .with_temperature_coefficient(-0.004);
        assert_eq!(specs.efficiency, 0.20);
        assert_eq!(specs.temperature_coefficient, -0.004);
    }

    #[test]
    fn plant_keeps_its_parts() {
        let loc = Location::new(40.7128, -74.0060).with_elevation(10.0);
        let specs = PlantSpecs::new(1000.0, 30.0, 180.0).with_efficiency(0.18);
        let plant = Plant::new(loc, specs);
        assert_eq!(plant.location, loc);
        assert_eq!(plant.specs, specs);
        assert_eq!(plant.capacity_kw(), 1000.0);
    }
}
