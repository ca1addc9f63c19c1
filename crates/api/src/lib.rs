pub mod climate;
pub mod dates;
pub mod db;
mod routes;
mod startup;
mod templates;
mod utils;

pub use climate::{
    ClimateService, DailyNormal, ErrorResponse, Precipitation, StationDirectory, StationSummary,
    TemperatureObservation, TemperatureObservations,
};
pub use db::{
    Measurement, ObservationData, SqliteStore, Station, StationActivity, StationRainfall,
    TemperatureStats,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
