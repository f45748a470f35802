mod climate;
mod evapotranspiration;
mod fluctuation;
mod health;

pub use climate::{ClimateSystem, EVENT_PROBABILITY, EVENT_TEMPERATURE_SHIFT};
pub use evapotranspiration::EvapotranspirationSystem;
pub use fluctuation::{FluctuationSystem, DAILY_TEMPERATURE_SWING};
pub use health::HealthSystem;
