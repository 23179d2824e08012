//! Sun position and angle of incidence on a tilted plane.
//!
//! Local wall-clock time is used directly as solar time: no timezone,
//! longitude or equation-of-time correction is applied. Outputs therefore
//! drift from true solar geometry by up to roughly 15° of hour angle
//! depending on where the site sits in its time zone.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use super::types::Location;

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Day of year whose declination is zero in this approximation (March 22).
const EQUINOX_DAY_OFFSET: f64 = 81.0;

/// Sun position for one timestamp, all angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// 1-indexed day of year (1 = January 1).
    pub day_of_year: u32,
    pub declination: f64,
    /// Negative before noon, positive after.
    pub hour_angle: f64,
    /// Elevation above the horizon; negative when the sun is below it.
    pub altitude: f64,
    /// Compass bearing clockwise from north.
    pub azimuth: f64,
}

pub fn solar_declination(day_of_year: u32) -> f64 {
    let arg = 360.0 / 365.0 * (f64::from(day_of_year) - EQUINOX_DAY_OFFSET);
    EARTH_AXIAL_TILT * arg.to_radians().sin()
}

/// Hour angle from the clock time of `timestamp`, treated as solar time.
pub fn hour_angle(timestamp: &NaiveDateTime) -> f64 {
    let solar_hour = f64::from(timestamp.hour())
        + f64::from(timestamp.minute()) / 60.0
        + f64::from(timestamp.second()) / 3600.0;
    (solar_hour - 12.0) * DEGREES_PER_HOUR
}

/// Altitude and azimuth of the sun at `timestamp` for `location`.
pub fn solar_position(timestamp: &NaiveDateTime, location: &Location) -> SolarPosition {
    let day_of_year = timestamp.ordinal();
    let declination = solar_declination(day_of_year);
    let hour_angle = hour_angle(timestamp);

    let lat = location.latitude.to_radians();
    let decl = declination.to_radians();
    let ha = hour_angle.to_radians();

    let sin_alt = (lat.sin() * decl.sin() + lat.cos() * decl.cos() * ha.cos()).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    // Vanishes with the sun at the zenith or the observer on a pole.
    let denom = lat.cos() * alt.cos();
    let cos_az = if denom.abs() < f64::EPSILON {
        -1.0
    } else {
        ((decl.sin() - lat.sin() * sin_alt) / denom).clamp(-1.0, 1.0)
    };
    let mut azimuth = cos_az.acos().to_degrees();
    if hour_angle > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    SolarPosition {
        day_of_year,
        declination,
        hour_angle,
        altitude: alt.to_degrees(),
        azimuth,
    }
}

/// Angle between the sun's rays and the normal of a tilted panel.
pub fn incident_angle(altitude: f64, azimuth: f64, tilt: f64, panel_azimuth: f64) -> f64 {
    let alt = altitude.to_radians();
    let tilt = tilt.to_radians();
    let rel_az = (azimuth - panel_azimuth).to_radians();

    let cos_incident = alt.sin() * tilt.cos() + alt.cos() * tilt.sin() * rel_az.cos();
    cos_incident.clamp(-1.0, 1.0).acos().to_degrees()
}
