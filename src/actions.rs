//! Player actions against the world: irrigation, heating, ventilation.
//!
//! Every action is a precondition-check-then-mutate transaction. Checks run
//! against current state before anything is touched, so a refused action
//! leaves the world exactly as it was.

use thiserror::Error;

use crate::world::{PlantStatus, World};

pub const HEATING_COST_KWH: f64 = 5.0;
pub const VENTILATION_COST_KWH: f64 = 3.0;
pub const IRRIGATION_LITERS_PER_10_PERCENT: f64 = 1.0;

pub const HEATING_TEMPERATURE_DELTA: f64 = 2.0;
pub const VENTILATION_TEMPERATURE_DELTA: f64 = -2.0;
pub const HEATING_HUMIDITY_DELTA: f64 = -5.0;
pub const VENTILATION_HUMIDITY_DELTA: f64 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("no plant with id {0}")]
    PlantNotFound(String),
    #[error("plant {0} is dead")]
    PlantDead(String),
    #[error("plant {0} is already at its optimal moisture")]
    NoWaterNeeded(String),
    #[error("not enough water for {plant_id}: {needed:.1} L needed, {available:.1} L in the tank")]
    InsufficientWater {
        plant_id: String,
        needed: f64,
        available: f64,
    },
    #[error("no greenhouse named '{0}'")]
    GreenhouseNotFound(String),
    #[error("not enough energy: {needed:.0} kWh needed, {available:.1} kWh left today")]
    InsufficientEnergy { needed: f64, available: f64 },
}

/// Liters required to bring a plant up to the optimal soil-moisture maximum.
/// Zero when the plant is already at or above the target.
pub fn irrigation_cost(soil_moisture_percent: f64, target_percent: f64) -> f64 {
    if soil_moisture_percent >= target_percent {
        return 0.0;
    }
    (target_percent - soil_moisture_percent) / 10.0 * IRRIGATION_LITERS_PER_10_PERCENT
}

/// Water one plant up to its optimal maximum, drawing from the global tank.
pub fn irrigate(world: &mut World, plant_id: &str) -> Result<String, ActionError> {
    let (gi, pi) = world
        .locate_plant(plant_id)
        .ok_or_else(|| ActionError::PlantNotFound(plant_id.to_string()))?;

    let greenhouse = &world.greenhouses[gi];
    let plant = &greenhouse.plants[pi];
    if plant.status == PlantStatus::Dead {
        return Err(ActionError::PlantDead(plant_id.to_string()));
    }

    let target = greenhouse.requirements.optimal_soil_moisture_range.1;
    let cost = irrigation_cost(plant.soil_moisture_percent, target);
    if cost == 0.0 {
        return Err(ActionError::NoWaterNeeded(plant_id.to_string()));
    }
    if world.resources.water_liters < cost {
        return Err(ActionError::InsufficientWater {
            plant_id: plant_id.to_string(),
            needed: cost,
            available: world.resources.water_liters,
        });
    }

    world.resources.water_liters -= cost;
    world.greenhouses[gi].plants[pi].soil_moisture_percent = target;
    Ok(format!("Irrigated {plant_id} ({cost:.1} L spent)."))
}

/// Run the heater in one greenhouse for the day: warmer and drier air.
pub fn heat(world: &mut World, greenhouse_name: &str) -> Result<String, ActionError> {
    climate_control(
        world,
        greenhouse_name,
        HEATING_COST_KWH,
        HEATING_TEMPERATURE_DELTA,
        HEATING_HUMIDITY_DELTA,
        "Heating on",
    )
}

/// Open the vents in one greenhouse for the day: cooler and moister air.
pub fn ventilate(world: &mut World, greenhouse_name: &str) -> Result<String, ActionError> {
    climate_control(
        world,
        greenhouse_name,
        VENTILATION_COST_KWH,
        VENTILATION_TEMPERATURE_DELTA,
        VENTILATION_HUMIDITY_DELTA,
        "Ventilation on",
    )
}

fn climate_control(
    world: &mut World,
    greenhouse_name: &str,
    cost_kwh: f64,
    temperature_delta: f64,
    humidity_delta: f64,
    label: &str,
) -> Result<String, ActionError> {
    let index = world
        .greenhouses
        .iter()
        .position(|g| g.name.eq_ignore_ascii_case(greenhouse_name))
        .ok_or_else(|| ActionError::GreenhouseNotFound(greenhouse_name.to_string()))?;
    if world.resources.energy_available_kwh < cost_kwh {
        return Err(ActionError::InsufficientEnergy {
            needed: cost_kwh,
            available: world.resources.energy_available_kwh,
        });
    }

    world.resources.energy_available_kwh -= cost_kwh;
    let greenhouse = &mut world.greenhouses[index];
    greenhouse.environment.shift_temperature(temperature_delta);
    greenhouse.environment.shift_humidity(humidity_delta);
    Ok(format!(
        "{label} in {} ({cost_kwh:.0} kWh spent).",
        greenhouse.name
    ))
}
