/// Timestamp clock for fixed-interval stepping.
pub mod clock;
pub mod engine;
/// Summary statistics for simulated series.
pub mod kpi;
pub mod types;

pub use engine::{Engine, simulate};
pub use kpi::SeriesSummary;
pub use types::{SimRequest, SimulationResult, SimulationSample};
