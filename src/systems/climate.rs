use anyhow::Result;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{System, SystemContext};
use crate::world::{ClimateEvent, World};

pub const EVENT_PROBABILITY: f64 = 0.15;
pub const EVENT_TEMPERATURE_SHIFT: f64 = 4.0;

/// EVENT_ROLL: at most one climate event per day, hitting every greenhouse
/// with the same temperature shift. The rolled event lands in the day log so
/// the report can announce it.
pub struct ClimateSystem;

impl ClimateSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClimateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ClimateSystem {
    fn name(&self) -> &'static str {
        "climate"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, rng: &mut ChaCha8Rng) -> Result<()> {
        if rng.gen::<f64>() >= EVENT_PROBABILITY {
            return Ok(());
        }
        let event = if rng.gen_bool(0.5) {
            ClimateEvent::ColdWave
        } else {
            ClimateEvent::HotDay
        };
        let shift = match event {
            ClimateEvent::ColdWave => -EVENT_TEMPERATURE_SHIFT,
            ClimateEvent::HotDay => EVENT_TEMPERATURE_SHIFT,
        };
        for greenhouse in &mut world.greenhouses {
            greenhouse.environment.shift_temperature(shift);
        }
        world.day_log.climate_event = Some(event);
        Ok(())
    }
}
