use anyhow::Result;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{System, SystemContext};
use crate::world::World;

pub const DAILY_TEMPERATURE_SWING: f64 = 1.0;

/// Natural day-to-day temperature noise: an independent uniform draw in
/// [-1.0, +1.0] degrees per greenhouse.
pub struct FluctuationSystem;

impl FluctuationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FluctuationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FluctuationSystem {
    fn name(&self) -> &'static str {
        "fluctuation"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, rng: &mut ChaCha8Rng) -> Result<()> {
        for greenhouse in &mut world.greenhouses {
            let delta = rng.gen_range(-DAILY_TEMPERATURE_SWING..=DAILY_TEMPERATURE_SWING);
            greenhouse.environment.shift_temperature(delta);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Environment, GlobalResources, Greenhouse, Plant, Requirements};
    use rand::SeedableRng;

    #[test]
    fn each_greenhouse_drifts_independently_within_the_swing() {
        let requirements = Requirements {
            optimal_temperature_range: (18.0, 26.0),
            optimal_soil_moisture_range: (65.0, 85.0),
            thermal_sensitivity_kt: 0.3,
            hydric_sensitivity_km: 0.28,
        };
        let house = |name: &str| Greenhouse {
            name: name.to_string(),
            environment: Environment::new(21.0, 88.0),
            species_name: "Nepenthes".to_string(),
            requirements: requirements.clone(),
            plants: vec![Plant::new("NEB01", 70.0, 78.0)],
        };
        let mut world = World::new(
            GlobalResources::new(240.0, 18.0),
            vec![house("North Dome"), house("South Dome")],
        );

        let ctx = SystemContext {
            day: 1,
            total_days: 10,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        FluctuationSystem::new()
            .run(&ctx, &mut world, &mut rng)
            .unwrap();

        let temps: Vec<f64> = world
            .greenhouses
            .iter()
            .map(|g| g.environment.temperature_celsius)
            .collect();
        for t in &temps {
            assert!((t - 21.0).abs() <= DAILY_TEMPERATURE_SWING, "drifted to {t}");
        }
        // Distinct draws per greenhouse; equal values would mean a shared one.
        assert_ne!(temps[0], temps[1]);
    }
}
