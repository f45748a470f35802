use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand_chacha::ChaCha8Rng;

use crate::actions::{self, ActionError};
use crate::command::{self, Command};
use crate::report;
use crate::rng::RngManager;
use crate::snapshot::SnapshotWriter;
use crate::systems::HealthSystem;
use crate::world::World;

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub days: u32,
    pub snapshot_dir: Option<PathBuf>,
}

pub struct SystemContext {
    pub day: u32,
    pub total_days: u32,
}

/// One passive process in the daily cycle. Systems draw randomness from their
/// own named stream so reordering one never perturbs another.
pub trait System {
    fn name(&self) -> &'static str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut ChaCha8Rng) -> Result<()>;
}

pub struct EngineBuilder {
    settings: EngineSettings,
    daybreak: Vec<Box<dyn System>>,
    dusk: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            daybreak: Vec::new(),
            dusk: Vec::new(),
        }
    }

    /// Runs before the daily report (climate events).
    pub fn at_daybreak(mut self, system: impl System + 'static) -> Self {
        self.daybreak.push(Box::new(system));
        self
    }

    /// Runs after the player turn (fluctuation, evapotranspiration).
    pub fn at_dusk(mut self, system: impl System + 'static) -> Self {
        self.dusk.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            daybreak: self.daybreak,
            health: HealthSystem::new(),
            dusk: self.dusk,
            snapshots: self
                .settings
                .snapshot_dir
                .as_ref()
                .map(SnapshotWriter::new),
            settings: self.settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    AllPlantsLost,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub days_played: u32,
    pub survivors: usize,
    pub total_plants: usize,
    pub outcome: SessionOutcome,
}

#[derive(PartialEq)]
enum DayOutcome {
    Continue,
    AllPlantsLost,
}

pub struct Engine {
    settings: EngineSettings,
    rng: RngManager,
    daybreak: Vec<Box<dyn System>>,
    health: HealthSystem,
    dusk: Vec<Box<dyn System>>,
    snapshots: Option<SnapshotWriter>,
}

impl Engine {
    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    /// Play the whole session: one day after another until the configured day
    /// count, or until a health update leaves no plant alive.
    pub fn run_session<R: BufRead, W: Write>(
        &mut self,
        world: &mut World,
        input: &mut R,
        output: &mut W,
    ) -> Result<SessionSummary> {
        let mut outcome = SessionOutcome::Completed;
        let mut days_played = 0;
        for day in 1..=self.settings.days {
            days_played = day;
            if self.run_day(world, day, input, output)? == DayOutcome::AllPlantsLost {
                outcome = SessionOutcome::AllPlantsLost;
                break;
            }
        }
        Ok(SessionSummary {
            days_played,
            survivors: world.alive_plants(),
            total_plants: world.total_plants(),
            outcome,
        })
    }

    /// One full day:
    /// DAY_START -> EVENT_ROLL -> REPORT -> HEALTH_UPDATE -> PLAYER_TURN
    /// -> PASSIVE_UPDATE. The player turn is skipped when the health update
    /// already lost the session.
    fn run_day<R: BufRead, W: Write>(
        &mut self,
        world: &mut World,
        day: u32,
        input: &mut R,
        output: &mut W,
    ) -> Result<DayOutcome> {
        world.begin_day();
        let ctx = SystemContext {
            day,
            total_days: self.settings.days,
        };

        for system in &mut self.daybreak {
            let rng = self.rng.stream(system.name());
            system.run(&ctx, world, rng)?;
        }

        report::daily(output, world, day, ctx.total_days)?;

        let rng = self.rng.stream(self.health.name());
        self.health.run(&ctx, world, rng)?;
        report::deaths(output, &world.day_log().deaths)?;

        if world.alive_plants() == 0 {
            writeln!(output, "\nEvery plant in the complex has died.")?;
            self.write_snapshot(world, day)?;
            return Ok(DayOutcome::AllPlantsLost);
        }

        self.player_turn(world, input, output)?;

        for system in &mut self.dusk {
            let rng = self.rng.stream(system.name());
            system.run(&ctx, world, rng)?;
        }

        self.write_snapshot(world, day)?;
        Ok(DayOutcome::Continue)
    }

    /// PLAYER_TURN: read commands until `pass`. Closed or interrupted input
    /// counts as an implicit pass, never as an error.
    fn player_turn<R: BufRead, W: Write>(
        &mut self,
        world: &mut World,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        writeln!(
            output,
            "\nYour turn. One command per line; 'pass' ends the day, 'help' lists commands."
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(output, "(input closed, ending the turn)")?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(_) => {
                    writeln!(output, "(input interrupted, ending the turn)")?;
                    return Ok(());
                }
            }

            match command::parse(&line) {
                Ok(Command::Pass) => {
                    writeln!(output, "Turn over, advancing to the next day.")?;
                    return Ok(());
                }
                Ok(Command::Help) => write!(output, "{}", command::HELP_TEXT)?,
                Ok(Command::Status) => report::status(output, world)?,
                Ok(Command::Water { plant_id }) => {
                    relay(output, actions::irrigate(world, &plant_id))?
                }
                Ok(Command::Heat { greenhouse }) => relay(output, actions::heat(world, &greenhouse))?,
                Ok(Command::Ventilate { greenhouse }) => {
                    relay(output, actions::ventilate(world, &greenhouse))?
                }
                Err(err) => writeln!(output, "{err}")?,
            }
        }
    }

    fn write_snapshot(&mut self, world: &World, day: u32) -> Result<()> {
        if let Some(writer) = &self.snapshots {
            writer.write(world, &self.settings.scenario_name, day)?;
        }
        Ok(())
    }
}

fn relay<W: Write>(output: &mut W, result: Result<String, ActionError>) -> std::io::Result<()> {
    match result {
        Ok(message) => writeln!(output, "{message}"),
        Err(err) => writeln!(output, "refused: {err}"),
    }
}
