use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::Rng;

use serres::{
    engine::{EngineBuilder, EngineSettings},
    report,
    scenario::{Scenario, ScenarioLoader},
    systems::{ClimateSystem, EvapotranspirationSystem, FluctuationSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Interactive greenhouse ecosystem simulation")]
struct Cli {
    /// Path to a YAML scenario file (skips the difficulty menu)
    #[arg(long, conflicts_with = "difficulty")]
    scenario: Option<PathBuf>,

    /// Built-in difficulty preset (skips the menu)
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Override the session length in days
    #[arg(long)]
    days: Option<u32>,

    /// Seed for the random streams (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON world snapshot after each day
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn scenario(self) -> Scenario {
        match self {
            Difficulty::Easy => Scenario::easy(),
            Difficulty::Medium => Scenario::medium(),
            Difficulty::Hard => Scenario::hard(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let scenario = match (&cli.scenario, cli.difficulty) {
        (Some(path), _) => ScenarioLoader::new(".").load(path)?,
        (None, Some(difficulty)) => difficulty.scenario(),
        (None, None) => {
            report::intro(&mut output)?;
            match difficulty_menu(&mut input, &mut output)? {
                Some(scenario) => scenario,
                None => {
                    writeln!(output, "Goodbye.")?;
                    return Ok(());
                }
            }
        }
    };
    scenario.validate()?;

    let seed = cli
        .seed
        .or(scenario.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed,
        days: scenario.days(cli.days),
        snapshot_dir: cli.snapshot_dir.clone(),
    };

    let mut world = scenario.build_world();
    let mut engine = EngineBuilder::new(settings)
        .at_daybreak(ClimateSystem::new())
        .at_dusk(FluctuationSystem::new())
        .at_dusk(EvapotranspirationSystem::new())
        .build();

    writeln!(
        output,
        "\nStarting '{}': {} days, {} plants. Keep them alive.",
        engine.scenario_name(),
        scenario.days(cli.days),
        world.total_plants()
    )?;

    let summary = engine.run_session(&mut world, &mut input, &mut output)?;
    report::final_report(&mut output, &world, &summary)?;
    Ok(())
}

/// The 1-4 difficulty menu; `None` means the player chose to leave.
fn difficulty_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Scenario>> {
    writeln!(output, "\nSelect a difficulty:")?;
    writeln!(output, "  1. Easy   - 1 greenhouse, 2 plants, generous resources")?;
    writeln!(output, "  2. Medium - 1 greenhouse, 3 plants, balanced resources")?;
    writeln!(output, "  3. Hard   - 2 greenhouses, tight resources")?;
    writeln!(output, "  4. Quit")?;

    loop {
        write!(output, "choice (1-4) > ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim() {
            "1" => return Ok(Some(Scenario::easy())),
            "2" => return Ok(Some(Scenario::medium())),
            "3" => return Ok(Some(Scenario::hard())),
            "4" => return Ok(None),
            other => writeln!(output, "'{other}' is not an option, enter 1-4.")?,
        }
    }
}
