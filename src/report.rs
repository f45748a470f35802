//! Console rendering: the intro banner, daily state report, status query,
//! death notices, and the end-of-session report. Everything writes to a
//! generic `Write` so sessions can be captured in tests.

use std::io::{self, Write};

use crate::engine::{SessionOutcome, SessionSummary};
use crate::stress;
use crate::systems::EVENT_TEMPERATURE_SHIFT;
use crate::world::{ClimateEvent, DeathNotice, Greenhouse, World};

const RULE: &str = "============================================================";

pub fn intro<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "LES GRANDES SERRES - GREENHOUSE KEEPER")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Objective: keep as many plants alive as you can.")?;
    writeln!(out)?;
    writeln!(out, "Each day you get a state report, then a turn to act:")?;
    writeln!(out, "  - irrigate plants from the shared water tank (never refilled)")?;
    writeln!(out, "  - heat or ventilate greenhouses on the daily energy budget")?;
    writeln!(out, "    (restored every morning)")?;
    writeln!(out)?;
    writeln!(out, "'status' shows each species' optimal ranges, 'help' the commands.")?;
    writeln!(out, "Prevention beats cure.")?;
    writeln!(out, "{RULE}")
}

pub fn daily<W: Write>(out: &mut W, world: &World, day: u32, total_days: u32) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "DAY {day}/{total_days} - STATE REPORT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Water tank: {:.1} L", world.resources.water_liters)?;
    writeln!(
        out,
        "Energy today: {:.1}/{:.1} kWh",
        world.resources.energy_available_kwh, world.resources.energy_capacity_kwh
    )?;
    if let Some(event) = world.day_log().climate_event {
        writeln!(out, "Climate event: {}", describe_event(event))?;
    }
    for greenhouse in &world.greenhouses {
        greenhouse_block(out, greenhouse)?;
    }
    writeln!(out, "\nmarkers: [!!] critical health, [!] weakened, [dry] below optimal moisture")
}

fn describe_event(event: ClimateEvent) -> String {
    match event {
        ClimateEvent::ColdWave => {
            format!("cold wave, -{EVENT_TEMPERATURE_SHIFT:.0} C in every greenhouse")
        }
        ClimateEvent::HotDay => {
            format!("hot day, +{EVENT_TEMPERATURE_SHIFT:.0} C in every greenhouse")
        }
    }
}

fn greenhouse_block<W: Write>(out: &mut W, greenhouse: &Greenhouse) -> io::Result<()> {
    let (t_min, t_max) = greenhouse.requirements.optimal_temperature_range;
    let (m_min, m_max) = greenhouse.requirements.optimal_soil_moisture_range;
    let temperature = greenhouse.environment.temperature_celsius;

    writeln!(out, "\n{} - {}", greenhouse.name, greenhouse.species_name)?;
    let hint = if temperature < t_min {
        " (needs heating)"
    } else if temperature > t_max {
        " (needs ventilation)"
    } else {
        ""
    };
    writeln!(
        out,
        "  temperature {temperature:.1} C, optimal {t_min:.0}-{t_max:.0} C{hint}"
    )?;
    writeln!(
        out,
        "  relative humidity {:.1}%",
        greenhouse.environment.relative_humidity_percent
    )?;
    writeln!(out, "  soil moisture target {m_min:.0}-{m_max:.0}%")?;
    writeln!(
        out,
        "  plants alive: {}/{}",
        greenhouse.alive_count(),
        greenhouse.plants.len()
    )?;
    for plant in greenhouse.alive_plants() {
        let health_marker = if plant.health_percent < 50.0 {
            "[!!]"
        } else if plant.health_percent < 80.0 {
            "[!]"
        } else {
            "[ok]"
        };
        let water_marker = if plant.soil_moisture_percent < m_min {
            " [dry]"
        } else {
            ""
        };
        writeln!(
            out,
            "    {health_marker} {}: health {:.1}%, soil moisture {:.1}%{water_marker}",
            plant.id, plant.health_percent, plant.soil_moisture_percent
        )?;
    }
    Ok(())
}

/// Death notices, batched after the health sweep.
pub fn deaths<W: Write>(out: &mut W, notices: &[DeathNotice]) -> io::Result<()> {
    for notice in notices {
        writeln!(
            out,
            "Plant {} in {} has died.",
            notice.plant_id, notice.greenhouse
        )?;
    }
    Ok(())
}

/// The `status` query: optimal ranges and current compliance per greenhouse.
pub fn status<W: Write>(out: &mut W, world: &World) -> io::Result<()> {
    writeln!(out, "Optimal conditions by greenhouse:")?;
    for greenhouse in &world.greenhouses {
        let (t_min, t_max) = greenhouse.requirements.optimal_temperature_range;
        let (m_min, m_max) = greenhouse.requirements.optimal_soil_moisture_range;
        let temperature = greenhouse.environment.temperature_celsius;
        let compliance =
            if stress::thermal_deviation(temperature, (t_min, t_max)) == 0.0 {
                "in range"
            } else {
                "OUT OF RANGE"
            };
        writeln!(out, "{} - {}", greenhouse.name, greenhouse.species_name)?;
        writeln!(
            out,
            "  temperature {t_min:.0}-{t_max:.0} C (currently {temperature:.1} C, {compliance})"
        )?;
        writeln!(out, "  soil moisture {m_min:.0}-{m_max:.0}%")?;
        let alive: Vec<&str> = greenhouse.alive_plants().map(|p| p.id.as_str()).collect();
        if alive.is_empty() {
            writeln!(out, "  no plants alive")?;
        } else {
            writeln!(out, "  alive: {}", alive.join(", "))?;
        }
    }
    Ok(())
}

pub fn final_report<W: Write>(out: &mut W, world: &World, summary: &SessionSummary) -> io::Result<()> {
    let ratio = if summary.total_plants > 0 {
        summary.survivors as f64 / summary.total_plants as f64 * 100.0
    } else {
        0.0
    };
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "FINAL REPORT")?;
    writeln!(out, "{RULE}")?;
    if summary.outcome == SessionOutcome::AllPlantsLost {
        writeln!(out, "The session ended early on day {}.", summary.days_played)?;
    }
    writeln!(
        out,
        "Surviving plants: {}/{} ({ratio:.1}%)",
        summary.survivors, summary.total_plants
    )?;
    writeln!(out, "Water remaining: {:.1} L", world.resources.water_liters)?;
    writeln!(out, "{}", rating(ratio))?;
    writeln!(out, "{RULE}")
}

/// Qualitative rating banded at 90/75/50% survival.
pub fn rating(survival_percent: f64) -> &'static str {
    if survival_percent >= 90.0 {
        "Rating: excellent. A master gardener's season."
    } else if survival_percent >= 75.0 {
        "Rating: very good. The collection is in capable hands."
    } else if survival_percent >= 50.0 {
        "Rating: acceptable. The greenhouses deserve closer attention."
    } else {
        "Rating: disastrous. The plants needed far better care."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bands_are_inclusive_at_their_floor() {
        assert!(rating(100.0).contains("excellent"));
        assert!(rating(90.0).contains("excellent"));
        assert!(rating(75.0).contains("very good"));
        assert!(rating(50.0).contains("acceptable"));
        assert!(rating(49.9).contains("disastrous"));
    }
}
