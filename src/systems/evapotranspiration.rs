use anyhow::Result;
use rand_chacha::ChaCha8Rng;

use crate::engine::{System, SystemContext};
use crate::world::World;

pub const DRY_AIR_RATE: f64 = -6.0;
pub const NORMAL_AIR_RATE: f64 = -4.0;
pub const HUMID_AIR_RATE: f64 = -2.0;

/// Daily soil-moisture loss, faster under dry air. Exactly 50% and 80%
/// relative humidity sit in the normal band.
pub fn rate_for(relative_humidity_percent: f64) -> f64 {
    if relative_humidity_percent < 50.0 {
        DRY_AIR_RATE
    } else if relative_humidity_percent > 80.0 {
        HUMID_AIR_RATE
    } else {
        NORMAL_AIR_RATE
    }
}

pub struct EvapotranspirationSystem;

impl EvapotranspirationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EvapotranspirationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EvapotranspirationSystem {
    fn name(&self) -> &'static str {
        "evapotranspiration"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut ChaCha8Rng,
    ) -> Result<()> {
        for greenhouse in &mut world.greenhouses {
            let rate = rate_for(greenhouse.environment.relative_humidity_percent);
            for plant in greenhouse.plants.iter_mut().filter(|p| p.is_alive()) {
                plant.soil_moisture_percent = (plant.soil_moisture_percent + rate).max(0.0);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{
        Environment, GlobalResources, Greenhouse, Plant, PlantStatus, Requirements,
    };
    use rand::SeedableRng;

    #[test]
    fn rate_bands_own_their_boundaries() {
        assert_eq!(rate_for(49.9), DRY_AIR_RATE);
        assert_eq!(rate_for(50.0), NORMAL_AIR_RATE);
        assert_eq!(rate_for(80.0), NORMAL_AIR_RATE);
        assert_eq!(rate_for(80.1), HUMID_AIR_RATE);
    }

    #[test]
    fn alive_plants_dry_out_but_never_below_zero() {
        let mut world = World::new(
            GlobalResources::new(240.0, 18.0),
            vec![Greenhouse {
                name: "Arid House".to_string(),
                environment: Environment::new(36.0, 28.0),
                species_name: "Cacti and Succulents".to_string(),
                requirements: Requirements {
                    optimal_temperature_range: (28.0, 38.0),
                    optimal_soil_moisture_range: (8.0, 18.0),
                    thermal_sensitivity_kt: 0.25,
                    hydric_sensitivity_km: 0.35,
                },
                plants: vec![
                    Plant::new("XER01", 12.0, 85.0),
                    Plant::new("XER02", 2.0, 82.0),
                    {
                        let mut dead = Plant::new("XER03", 10.0, 0.0);
                        dead.status = PlantStatus::Dead;
                        dead
                    },
                ],
            }],
        );

        let ctx = SystemContext {
            day: 1,
            total_days: 10,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        EvapotranspirationSystem::new()
            .run(&ctx, &mut world, &mut rng)
            .unwrap();

        let plants = &world.greenhouses[0].plants;
        // 28% humidity is the dry band: -6 per day.
        assert_eq!(plants[0].soil_moisture_percent, 6.0);
        assert_eq!(plants[1].soil_moisture_percent, 0.0);
        // Dead plants are frozen.
        assert_eq!(plants[2].soil_moisture_percent, 10.0);
    }
}
