//! Fixed-tilt PV plant: site and array description, sun geometry, and the
//! clear-sky power model.

/// Solar position and angle of incidence.
pub mod geometry;
/// Clear-sky irradiance and power estimate.
pub mod irradiance;
pub mod types;

pub use geometry::{SolarPosition, incident_angle, solar_position};
pub use irradiance::power_kw;
pub use types::{Location, Plant, PlantSpecs, PowerModel};
