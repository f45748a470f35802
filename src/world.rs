use serde::{Deserialize, Serialize};

/// Shared resource pools for the whole complex. Water is drawn from a single
/// tank and never refilled; energy is a daily budget restored to capacity at
/// the start of every day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResources {
    pub water_liters: f64,
    pub energy_capacity_kwh: f64,
    pub energy_available_kwh: f64,
}

impl GlobalResources {
    pub fn new(water_liters: f64, energy_capacity_kwh: f64) -> Self {
        Self {
            water_liters,
            energy_capacity_kwh,
            energy_available_kwh: energy_capacity_kwh,
        }
    }

    pub fn restore_energy(&mut self) {
        self.energy_available_kwh = self.energy_capacity_kwh;
    }
}

/// Air conditions inside one greenhouse. Temperature is unbounded; relative
/// humidity is kept in [0, 100] by the mutation helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub temperature_celsius: f64,
    pub relative_humidity_percent: f64,
}

impl Environment {
    pub fn new(temperature_celsius: f64, relative_humidity_percent: f64) -> Self {
        Self {
            temperature_celsius,
            relative_humidity_percent: relative_humidity_percent.clamp(0.0, 100.0),
        }
    }

    pub fn shift_temperature(&mut self, delta: f64) {
        self.temperature_celsius += delta;
    }

    pub fn shift_humidity(&mut self, delta: f64) {
        self.relative_humidity_percent =
            (self.relative_humidity_percent + delta).clamp(0.0, 100.0);
    }
}

/// Species tolerances for one greenhouse. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirements {
    pub optimal_temperature_range: (f64, f64),
    pub optimal_soil_moisture_range: (f64, f64),
    pub thermal_sensitivity_kt: f64,
    pub hydric_sensitivity_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub soil_moisture_percent: f64,
    pub health_percent: f64,
    pub status: PlantStatus,
}

impl Plant {
    pub fn new(id: impl Into<String>, soil_moisture_percent: f64, health_percent: f64) -> Self {
        Self {
            id: id.into(),
            soil_moisture_percent,
            health_percent: health_percent.clamp(0.0, 100.0),
            status: PlantStatus::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlantStatus::Alive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greenhouse {
    pub name: String,
    pub environment: Environment,
    pub species_name: String,
    pub requirements: Requirements,
    pub plants: Vec<Plant>,
}

impl Greenhouse {
    pub fn alive_plants(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive_plants().count()
    }
}

/// A one-day climate event, applied uniformly to every greenhouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateEvent {
    ColdWave,
    HotDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathNotice {
    pub greenhouse: String,
    pub plant_id: String,
}

/// Per-day bookkeeping filled by the daybreak and health systems and drained
/// by the reports. Cleared at the start of every day.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DayLog {
    pub climate_event: Option<ClimateEvent>,
    pub deaths: Vec<DeathNotice>,
}

pub struct World {
    pub resources: GlobalResources,
    pub greenhouses: Vec<Greenhouse>,
    pub(crate) day_log: DayLog,
}

impl World {
    pub fn new(resources: GlobalResources, greenhouses: Vec<Greenhouse>) -> Self {
        Self {
            resources,
            greenhouses,
            day_log: DayLog::default(),
        }
    }

    /// DAY_START: energy returns to capacity, the previous day's log is
    /// discarded. Water carries over untouched.
    pub fn begin_day(&mut self) {
        self.resources.restore_energy();
        self.day_log = DayLog::default();
    }

    pub fn day_log(&self) -> &DayLog {
        &self.day_log
    }

    /// Greenhouse lookup by name, case-insensitive.
    pub fn greenhouse(&self, name: &str) -> Option<&Greenhouse> {
        self.greenhouses
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn greenhouse_mut(&mut self, name: &str) -> Option<&mut Greenhouse> {
        self.greenhouses
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Position of a plant as (greenhouse index, plant index). Plant ids are
    /// matched exactly as given.
    pub fn locate_plant(&self, plant_id: &str) -> Option<(usize, usize)> {
        self.greenhouses.iter().enumerate().find_map(|(gi, g)| {
            g.plants
                .iter()
                .position(|p| p.id == plant_id)
                .map(|pi| (gi, pi))
        })
    }

    pub fn alive_plants(&self) -> usize {
        self.greenhouses.iter().map(|g| g.alive_count()).sum()
    }

    pub fn total_plants(&self) -> usize {
        self.greenhouses.iter().map(|g| g.plants.len()).sum()
    }

    pub fn snapshot(&self, scenario: &str, day: u32) -> WorldSnapshot {
        WorldSnapshot {
            scenario: scenario.to_string(),
            day,
            water_liters: self.resources.water_liters,
            energy_available_kwh: self.resources.energy_available_kwh,
            energy_capacity_kwh: self.resources.energy_capacity_kwh,
            alive_plants: self.alive_plants(),
            total_plants: self.total_plants(),
            greenhouses: self
                .greenhouses
                .iter()
                .map(|g| GreenhouseSnapshot {
                    name: g.name.clone(),
                    species: g.species_name.clone(),
                    temperature_celsius: g.environment.temperature_celsius,
                    relative_humidity_percent: g.environment.relative_humidity_percent,
                    plants: g
                        .plants
                        .iter()
                        .map(|p| PlantSnapshot {
                            id: p.id.clone(),
                            soil_moisture_percent: p.soil_moisture_percent,
                            health_percent: p.health_percent,
                            status: p.status,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub day: u32,
    pub water_liters: f64,
    pub energy_available_kwh: f64,
    pub energy_capacity_kwh: f64,
    pub alive_plants: usize,
    pub total_plants: usize,
    pub greenhouses: Vec<GreenhouseSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GreenhouseSnapshot {
    pub name: String,
    pub species: String,
    pub temperature_celsius: f64,
    pub relative_humidity_percent: f64,
    pub plants: Vec<PlantSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub id: String,
    pub soil_moisture_percent: f64,
    pub health_percent: f64,
    pub status: PlantStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> World {
        let greenhouse = Greenhouse {
            name: "Tropical House".to_string(),
            environment: Environment::new(27.0, 75.0),
            species_name: "Phalaenopsis Orchid".to_string(),
            requirements: Requirements {
                optimal_temperature_range: (24.0, 30.0),
                optimal_soil_moisture_range: (55.0, 75.0),
                thermal_sensitivity_kt: 0.12,
                hydric_sensitivity_km: 0.1,
            },
            plants: vec![Plant::new("ORQ01", 60.0, 100.0)],
        };
        World::new(GlobalResources::new(320.0, 24.0), vec![greenhouse])
    }

    #[test]
    fn greenhouse_lookup_ignores_case() {
        let world = sample_world();
        assert!(world.greenhouse("tropical house").is_some());
        assert!(world.greenhouse("TROPICAL HOUSE").is_some());
        assert!(world.greenhouse("Alpine House").is_none());
    }

    #[test]
    fn plant_lookup_is_exact() {
        let world = sample_world();
        assert_eq!(world.locate_plant("ORQ01"), Some((0, 0)));
        assert_eq!(world.locate_plant("orq01"), None);
    }

    #[test]
    fn begin_day_restores_energy_and_clears_log() {
        let mut world = sample_world();
        world.resources.energy_available_kwh = 3.0;
        world.day_log.climate_event = Some(ClimateEvent::HotDay);
        world.begin_day();
        assert_eq!(world.resources.energy_available_kwh, 24.0);
        assert!(world.day_log.climate_event.is_none());
    }

    #[test]
    fn humidity_is_clamped() {
        let mut env = Environment::new(20.0, 98.0);
        env.shift_humidity(5.0);
        assert_eq!(env.relative_humidity_percent, 100.0);
        env.shift_humidity(-150.0);
        assert_eq!(env.relative_humidity_percent, 0.0);
    }
}
