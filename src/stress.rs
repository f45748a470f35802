//! Daily stress and health arithmetic for a single plant.
//!
//! Health moves once per day by `health_delta`: a fixed recovery bonus when
//! both deviations are zero, otherwise a quadratic penalty weighted by the
//! species' sensitivity constants.

use crate::world::{Environment, Plant, Requirements};

/// Health regained per day by a plant whose thermal and hydric deviations are
/// both zero.
pub const OPTIMAL_RECOVERY_BONUS: f64 = 0.5;

/// Distance from `temperature` to the optimal band, zero inside it.
pub fn thermal_deviation(temperature: f64, (min, max): (f64, f64)) -> f64 {
    if temperature < min {
        min - temperature
    } else if temperature > max {
        temperature - max
    } else {
        0.0
    }
}

/// Moisture shortfall below the optimal minimum. The upper bound of the range
/// only matters as the irrigation target, never as a stress source.
pub fn hydric_deviation(soil_moisture: f64, (min, _max): (f64, f64)) -> f64 {
    if soil_moisture >= min {
        0.0
    } else {
        min - soil_moisture
    }
}

/// Signed daily health change. Dead plants are frozen at zero.
pub fn health_delta(plant: &Plant, environment: &Environment, requirements: &Requirements) -> f64 {
    if !plant.is_alive() {
        return 0.0;
    }

    let dt = thermal_deviation(
        environment.temperature_celsius,
        requirements.optimal_temperature_range,
    );
    let dm = hydric_deviation(
        plant.soil_moisture_percent,
        requirements.optimal_soil_moisture_range,
    );

    if dt == 0.0 && dm == 0.0 {
        return OPTIMAL_RECOVERY_BONUS;
    }

    -(requirements.thermal_sensitivity_kt * dt.powi(2)
        + requirements.hydric_sensitivity_km * dm.powi(2))
}
