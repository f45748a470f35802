//! Action engine contract: preconditions, exact costs, and transactionality.

use serres::actions::{self, ActionError};
use serres::scenario::Scenario;
use serres::world::{PlantStatus, World};

fn easy_world() -> World {
    Scenario::easy().build_world()
}

#[test]
fn irrigation_cost_is_one_liter_per_ten_percent() {
    assert_eq!(actions::irrigation_cost(40.0, 75.0), 3.5);
    assert_eq!(actions::irrigation_cost(75.0, 75.0), 0.0);
    assert_eq!(actions::irrigation_cost(80.0, 75.0), 0.0);
}

#[test]
fn irrigate_fills_to_the_optimal_maximum_and_charges_the_tank() {
    let mut world = easy_world();
    world.greenhouses[0].plants[0].soil_moisture_percent = 40.0;

    let message = actions::irrigate(&mut world, "ORQ01").unwrap();
    assert!(message.contains("3.5 L"), "unexpected message: {message}");
    assert_eq!(world.greenhouses[0].plants[0].soil_moisture_percent, 75.0);
    assert_eq!(world.resources.water_liters, 316.5);
}

#[test]
fn irrigating_a_full_plant_is_a_refused_noop() {
    let mut world = easy_world();
    world.greenhouses[0].plants[0].soil_moisture_percent = 40.0;

    actions::irrigate(&mut world, "ORQ01").unwrap();
    let before = world.resources.water_liters;
    assert_eq!(
        actions::irrigate(&mut world, "ORQ01"),
        Err(ActionError::NoWaterNeeded("ORQ01".to_string()))
    );
    assert_eq!(world.resources.water_liters, before);
}

#[test]
fn irrigate_rejects_unknown_and_dead_plants() {
    let mut world = easy_world();
    assert_eq!(
        actions::irrigate(&mut world, "NOPE"),
        Err(ActionError::PlantNotFound("NOPE".to_string()))
    );

    world.greenhouses[0].plants[0].status = PlantStatus::Dead;
    assert_eq!(
        actions::irrigate(&mut world, "ORQ01"),
        Err(ActionError::PlantDead("ORQ01".to_string()))
    );
}

#[test]
fn irrigate_without_water_changes_nothing() {
    let mut world = easy_world();
    world.resources.water_liters = 1.0;
    world.greenhouses[0].plants[0].soil_moisture_percent = 40.0;

    let result = actions::irrigate(&mut world, "ORQ01");
    assert!(matches!(
        result,
        Err(ActionError::InsufficientWater { .. })
    ));
    assert_eq!(world.resources.water_liters, 1.0);
    assert_eq!(world.greenhouses[0].plants[0].soil_moisture_percent, 40.0);
}

#[test]
fn heating_warms_and_dries_on_the_energy_budget() {
    let mut world = easy_world();
    actions::heat(&mut world, "Tropical House").unwrap();

    let env = &world.greenhouses[0].environment;
    assert_eq!(env.temperature_celsius, 29.0);
    assert_eq!(env.relative_humidity_percent, 70.0);
    assert_eq!(world.resources.energy_available_kwh, 19.0);
}

#[test]
fn heating_without_energy_changes_nothing() {
    let mut world = easy_world();
    world.resources.energy_available_kwh = 2.0;

    let result = actions::heat(&mut world, "Tropical House");
    assert_eq!(
        result,
        Err(ActionError::InsufficientEnergy {
            needed: 5.0,
            available: 2.0
        })
    );
    let env = &world.greenhouses[0].environment;
    assert_eq!(env.temperature_celsius, 27.0);
    assert_eq!(env.relative_humidity_percent, 75.0);
    assert_eq!(world.resources.energy_available_kwh, 2.0);
}

#[test]
fn humidity_is_floored_and_capped_by_climate_actions() {
    let mut world = easy_world();
    world.greenhouses[0].environment.relative_humidity_percent = 3.0;
    actions::heat(&mut world, "Tropical House").unwrap();
    assert_eq!(world.greenhouses[0].environment.relative_humidity_percent, 0.0);

    world.greenhouses[0].environment.relative_humidity_percent = 98.0;
    actions::ventilate(&mut world, "Tropical House").unwrap();
    assert_eq!(
        world.greenhouses[0].environment.relative_humidity_percent,
        100.0
    );
}

#[test]
fn ventilation_cools_and_moistens_for_three_kwh() {
    let mut world = easy_world();
    actions::ventilate(&mut world, "tropical HOUSE").unwrap();

    let env = &world.greenhouses[0].environment;
    assert_eq!(env.temperature_celsius, 25.0);
    assert_eq!(env.relative_humidity_percent, 80.0);
    assert_eq!(world.resources.energy_available_kwh, 21.0);
}

#[test]
fn unknown_greenhouses_are_rejected_before_spending() {
    let mut world = easy_world();
    assert_eq!(
        actions::ventilate(&mut world, "Alpine House"),
        Err(ActionError::GreenhouseNotFound("Alpine House".to_string()))
    );
    assert_eq!(world.resources.energy_available_kwh, 24.0);
}

#[test]
fn water_never_increases_across_any_action_sequence() {
    let mut world = easy_world();
    world.greenhouses[0].plants[0].soil_moisture_percent = 30.0;
    world.greenhouses[0].plants[1].soil_moisture_percent = 50.0;

    let mut last = world.resources.water_liters;
    let script: &[&dyn Fn(&mut World) -> Result<String, ActionError>] = &[
        &|w| actions::irrigate(w, "ORQ01"),
        &|w| actions::heat(w, "Tropical House"),
        &|w| actions::irrigate(w, "ORQ01"),
        &|w| actions::irrigate(w, "MISSING"),
        &|w| actions::ventilate(w, "Tropical House"),
        &|w| actions::irrigate(w, "ORQ02"),
        &|w| actions::irrigate(w, "ORQ02"),
    ];
    for step in script {
        let _ = step(&mut world);
        assert!(world.resources.water_liters <= last);
        last = world.resources.water_liters;
    }
}
