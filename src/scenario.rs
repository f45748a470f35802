use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::world::{
    Environment, GlobalResources, Greenhouse, Plant, Requirements, World,
};

/// Session length when neither the scenario nor the CLI says otherwise.
pub const DEFAULT_DAYS: u32 = 10;

fn default_days() -> u32 {
    DEFAULT_DAYS
}

fn default_health() -> f64 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_days")]
    pub days: u32,
    pub resources: ResourcesInit,
    pub greenhouses: Vec<GreenhouseInit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourcesInit {
    pub water_liters: f64,
    pub energy_kwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GreenhouseInit {
    pub name: String,
    pub species: String,
    pub temperature: f64,
    pub relative_humidity: f64,
    pub optimal_temperature: (f64, f64),
    pub optimal_soil_moisture: (f64, f64),
    pub thermal_sensitivity: f64,
    pub hydric_sensitivity: f64,
    pub plants: Vec<PlantInit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlantInit {
    pub id: String,
    pub soil_moisture: f64,
    #[serde(default = "default_health")]
    pub health: f64,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scenario file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid scenario: {0}")]
    Validation(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        let scenario: Scenario =
            serde_yaml::from_str(&data).map_err(|source| ScenarioError::Parse { path, source })?;
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    /// One generously-resourced tropical house.
    pub fn easy() -> Self {
        Self {
            name: "easy".to_string(),
            description: Some("1 greenhouse, 2 plants, generous resources".to_string()),
            seed: None,
            days: DEFAULT_DAYS,
            resources: ResourcesInit {
                water_liters: 320.0,
                energy_kwh: 24.0,
            },
            greenhouses: vec![GreenhouseInit {
                name: "Tropical House".to_string(),
                species: "Phalaenopsis Orchid".to_string(),
                temperature: 27.0,
                relative_humidity: 75.0,
                optimal_temperature: (24.0, 30.0),
                optimal_soil_moisture: (55.0, 75.0),
                thermal_sensitivity: 0.12,
                hydric_sensitivity: 0.1,
                plants: vec![
                    PlantInit {
                        id: "ORQ01".to_string(),
                        soil_moisture: 60.0,
                        health: 100.0,
                    },
                    PlantInit {
                        id: "ORQ02".to_string(),
                        soil_moisture: 58.0,
                        health: 98.0,
                    },
                ],
            }],
        }
    }

    /// A more demanding species on a tighter budget.
    pub fn medium() -> Self {
        Self {
            name: "medium".to_string(),
            description: Some("1 greenhouse, 3 plants, balanced resources".to_string()),
            seed: None,
            days: DEFAULT_DAYS,
            resources: ResourcesInit {
                water_liters: 280.0,
                energy_kwh: 20.0,
            },
            greenhouses: vec![GreenhouseInit {
                name: "Mediterranean House".to_string(),
                species: "Lavender and Aromatics".to_string(),
                temperature: 24.0,
                relative_humidity: 55.0,
                optimal_temperature: (20.0, 27.0),
                optimal_soil_moisture: (35.0, 55.0),
                thermal_sensitivity: 0.18,
                hydric_sensitivity: 0.22,
                plants: vec![
                    PlantInit {
                        id: "MED01".to_string(),
                        soil_moisture: 42.0,
                        health: 92.0,
                    },
                    PlantInit {
                        id: "MED02".to_string(),
                        soil_moisture: 38.0,
                        health: 88.0,
                    },
                    PlantInit {
                        id: "MED03".to_string(),
                        soil_moisture: 40.0,
                        health: 90.0,
                    },
                ],
            }],
        }
    }

    /// Two houses with opposite needs and very little slack.
    pub fn hard() -> Self {
        Self {
            name: "hard".to_string(),
            description: Some("2 greenhouses, tight resources".to_string()),
            seed: None,
            days: DEFAULT_DAYS,
            resources: ResourcesInit {
                water_liters: 240.0,
                energy_kwh: 18.0,
            },
            greenhouses: vec![
                GreenhouseInit {
                    name: "Arid House".to_string(),
                    species: "Cacti and Succulents".to_string(),
                    temperature: 36.0,
                    relative_humidity: 28.0,
                    optimal_temperature: (28.0, 38.0),
                    optimal_soil_moisture: (8.0, 18.0),
                    thermal_sensitivity: 0.25,
                    hydric_sensitivity: 0.35,
                    plants: vec![
                        PlantInit {
                            id: "XER01".to_string(),
                            soil_moisture: 12.0,
                            health: 85.0,
                        },
                        PlantInit {
                            id: "XER02".to_string(),
                            soil_moisture: 10.0,
                            health: 82.0,
                        },
                    ],
                },
                GreenhouseInit {
                    name: "Cloud Forest House".to_string(),
                    species: "Nepenthes and Carnivorous Plants".to_string(),
                    temperature: 21.0,
                    relative_humidity: 88.0,
                    optimal_temperature: (18.0, 26.0),
                    optimal_soil_moisture: (65.0, 85.0),
                    thermal_sensitivity: 0.3,
                    hydric_sensitivity: 0.28,
                    plants: vec![
                        PlantInit {
                            id: "NEB01".to_string(),
                            soil_moisture: 70.0,
                            health: 78.0,
                        },
                        PlantInit {
                            id: "NEB02".to_string(),
                            soil_moisture: 68.0,
                            health: 80.0,
                        },
                    ],
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        let fail = |msg: String| Err(ScenarioError::Validation(msg));

        if self.greenhouses.is_empty() {
            return fail("at least one greenhouse is required".to_string());
        }
        if self.resources.water_liters < 0.0 || self.resources.energy_kwh < 0.0 {
            return fail("resource levels must be non-negative".to_string());
        }

        let mut greenhouse_names: Vec<String> = Vec::new();
        let mut plant_ids: Vec<&str> = Vec::new();
        for greenhouse in &self.greenhouses {
            let lowered = greenhouse.name.to_lowercase();
            if greenhouse_names.contains(&lowered) {
                return fail(format!(
                    "greenhouse name '{}' is used more than once",
                    greenhouse.name
                ));
            }
            greenhouse_names.push(lowered);

            let (t_min, t_max) = greenhouse.optimal_temperature;
            let (m_min, m_max) = greenhouse.optimal_soil_moisture;
            if t_min > t_max || m_min > m_max {
                return fail(format!(
                    "optimal ranges for '{}' must satisfy min <= max",
                    greenhouse.name
                ));
            }
            if greenhouse.thermal_sensitivity < 0.0 || greenhouse.hydric_sensitivity < 0.0 {
                return fail(format!(
                    "sensitivity constants for '{}' must be non-negative",
                    greenhouse.name
                ));
            }
            if greenhouse.plants.is_empty() {
                return fail(format!("greenhouse '{}' has no plants", greenhouse.name));
            }
            for plant in &greenhouse.plants {
                if plant_ids.contains(&plant.id.as_str()) {
                    return fail(format!("plant id '{}' is used more than once", plant.id));
                }
                plant_ids.push(&plant.id);
                if plant.soil_moisture < 0.0 {
                    return fail(format!(
                        "plant '{}' has negative soil moisture",
                        plant.id
                    ));
                }
                if !(0.0..=100.0).contains(&plant.health) {
                    return fail(format!(
                        "plant '{}' health must be within 0-100",
                        plant.id
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn build_world(&self) -> World {
        let greenhouses = self
            .greenhouses
            .iter()
            .map(|g| Greenhouse {
                name: g.name.clone(),
                environment: Environment::new(g.temperature, g.relative_humidity),
                species_name: g.species.clone(),
                requirements: Requirements {
                    optimal_temperature_range: g.optimal_temperature,
                    optimal_soil_moisture_range: g.optimal_soil_moisture,
                    thermal_sensitivity_kt: g.thermal_sensitivity,
                    hydric_sensitivity_km: g.hydric_sensitivity,
                },
                plants: g
                    .plants
                    .iter()
                    .map(|p| Plant::new(p.id.clone(), p.soil_moisture, p.health))
                    .collect(),
            })
            .collect();
        World::new(
            GlobalResources::new(self.resources.water_liters, self.resources.energy_kwh),
            greenhouses,
        )
    }

    pub fn days(&self, override_days: Option<u32>) -> u32 {
        override_days.unwrap_or(self.days)
    }
}
