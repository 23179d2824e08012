//! Clear-sky irradiance and DC power estimate for a fixed-tilt plant.
//!
//! Beam irradiance follows a Bouguer-law attenuation with a fixed
//! atmospheric transmittance and a plane-parallel air mass. Diffuse and
//! ground-reflected components are not modeled.

use chrono::NaiveDateTime;

use super::geometry::{incident_angle, solar_position};
use super::types::{Location, PlantSpecs};

/// Extraterrestrial beam irradiance scaled to a round figure (W/m²).
pub const PEAK_IRRADIANCE_W_M2: f64 = 1000.0;
/// Fraction of beam irradiance passing one air mass.
pub const ATMOSPHERIC_TRANSMITTANCE: f64 = 0.7;
/// Temperature at which panel ratings are quoted (°C).
pub const REFERENCE_TEMP_C: f64 = 25.0;
/// Ambient temperature assumed for every sample (°C); no weather input.
pub const AMBIENT_TEMP_C: f64 = 25.0;

/// Relative optical path length for a sun at `altitude` degrees.
///
/// Diverges as the altitude approaches zero; callers only pass altitudes
/// above the horizon.
pub fn air_mass(altitude: f64) -> f64 {
    1.0 / altitude.to_radians().sin()
}

/// Beam irradiance on the panel plane (W/m²). Negative when the sun is
/// behind the panel; the final power clamp takes care of that.
pub fn clear_sky_insolation(air_mass: f64, incidence: f64) -> f64 {
    PEAK_IRRADIANCE_W_M2 * ATMOSPHERIC_TRANSMITTANCE.powf(air_mass) * incidence.to_radians().cos()
}

/// Multiplicative derating for a panel running at `ambient_c`.
pub fn temperature_derate(temperature_coefficient: f64, ambient_c: f64) -> f64 {
    1.0 + temperature_coefficient * (ambient_c - REFERENCE_TEMP_C)
}

/// Estimated output power in kW at `timestamp`, within `[0, capacity_kw]`.
///
/// Returns exactly 0.0 whenever the sun is at or below the horizon, and
/// for non-finite inputs.
pub fn power_kw(timestamp: NaiveDateTime, location: &Location, specs: &PlantSpecs) -> f64 {
    let pos = solar_position(&timestamp, location);
    // NaN comes from non-finite site inputs.
    if pos.altitude.is_nan() || pos.altitude <= 0.0 {
        return 0.0;
    }

    let incidence = incident_angle(pos.altitude, pos.azimuth, specs.tilt_angle, specs.azimuth_angle);
    let insolation = clear_sky_insolation(air_mass(pos.altitude), incidence);

    let raw_kw = insolation * specs.capacity_kw * specs.efficiency / 1000.0;
    let kw = raw_kw * temperature_derate(specs.temperature_coefficient, AMBIENT_TEMP_C);

    if !kw.is_finite() {
        return 0.0;
    }
    // min before max: a non-positive capacity collapses to zero instead of panicking.
    kw.min(specs.capacity_kw).max(0.0)
}
