use anyhow::Result;
use rand_chacha::ChaCha8Rng;

use crate::engine::{System, SystemContext};
use crate::stress;
use crate::world::{DeathNotice, PlantStatus, World};

/// HEALTH_UPDATE: apply the daily stress delta to every alive plant. Deaths
/// are collected into the day log during the sweep and surfaced afterwards,
/// never interleaved with it.
pub struct HealthSystem;

impl HealthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut ChaCha8Rng,
    ) -> Result<()> {
        let mut deaths = Vec::new();
        for greenhouse in &mut world.greenhouses {
            let name = &greenhouse.name;
            let environment = &greenhouse.environment;
            let requirements = &greenhouse.requirements;
            for plant in &mut greenhouse.plants {
                if !plant.is_alive() {
                    continue;
                }
                let delta = stress::health_delta(plant, environment, requirements);
                plant.health_percent = (plant.health_percent + delta).clamp(0.0, 100.0);
                if plant.health_percent <= 0.0 {
                    plant.status = PlantStatus::Dead;
                    deaths.push(DeathNotice {
                        greenhouse: name.clone(),
                        plant_id: plant.id.clone(),
                    });
                }
            }
        }
        world.day_log.deaths = deaths;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Environment, GlobalResources, Greenhouse, Plant, Requirements};
    use rand::SeedableRng;

    fn run_once(world: &mut World) {
        let ctx = SystemContext {
            day: 1,
            total_days: 10,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        HealthSystem::new().run(&ctx, world, &mut rng).unwrap();
    }

    fn hostile_world(health: f64) -> World {
        World::new(
            GlobalResources::new(100.0, 10.0),
            vec![Greenhouse {
                name: "Tropical House".to_string(),
                // 14 C against a (24, 30) optimum: dT = 10, delta = -12.
                environment: Environment::new(14.0, 75.0),
                species_name: "Phalaenopsis Orchid".to_string(),
                requirements: Requirements {
                    optimal_temperature_range: (24.0, 30.0),
                    optimal_soil_moisture_range: (55.0, 75.0),
                    thermal_sensitivity_kt: 0.12,
                    hydric_sensitivity_km: 0.1,
                },
                plants: vec![Plant::new("ORQ01", 60.0, health)],
            }],
        )
    }

    #[test]
    fn reaching_zero_kills_and_notifies() {
        let mut world = hostile_world(12.0);
        run_once(&mut world);
        let plant = &world.greenhouses[0].plants[0];
        assert_eq!(plant.health_percent, 0.0);
        assert_eq!(plant.status, PlantStatus::Dead);
        assert_eq!(
            world.day_log().deaths,
            vec![DeathNotice {
                greenhouse: "Tropical House".to_string(),
                plant_id: "ORQ01".to_string(),
            }]
        );
    }

    #[test]
    fn dead_plants_are_skipped_on_later_sweeps() {
        let mut world = hostile_world(5.0);
        run_once(&mut world);
        assert_eq!(world.alive_plants(), 0);
        run_once(&mut world);
        let plant = &world.greenhouses[0].plants[0];
        assert_eq!(plant.health_percent, 0.0);
        assert!(world.day_log().deaths.is_empty(), "no second death notice");
    }

    #[test]
    fn recovery_is_capped_at_full_health() {
        let mut world = hostile_world(99.8);
        world.greenhouses[0].environment = Environment::new(27.0, 75.0);
        run_once(&mut world);
        assert_eq!(world.greenhouses[0].plants[0].health_percent, 100.0);
    }
}
