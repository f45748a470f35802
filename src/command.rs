//! Free-text command parsing for the player turn.
//!
//! Parsing is separated from execution: a line becomes a [`Command`] variant
//! or a [`ParseError`], and the turn loop decides what to do with either.
//! Neither path is fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Water { plant_id: String },
    Heat { greenhouse: String },
    Ventilate { greenhouse: String },
    Pass,
    Help,
    Status,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command, type 'help' for the command list")]
    EmptyLine,
    #[error("usage: water <plant-id>")]
    BadWaterUsage,
    #[error("usage: {0} <greenhouse name>")]
    MissingGreenhouse(&'static str),
    #[error("unknown command '{0}', type 'help' for the command list")]
    UnknownCommand(String),
}

/// Parse one whitespace-tokenized line. The verb is case-insensitive; plant
/// ids are uppercased and greenhouse names title-cased by convention.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Err(ParseError::EmptyLine);
    };

    match verb.to_ascii_lowercase().as_str() {
        "water" => match args {
            [plant_id] => Ok(Command::Water {
                plant_id: plant_id.to_ascii_uppercase(),
            }),
            _ => Err(ParseError::BadWaterUsage),
        },
        "heat" => {
            if args.is_empty() {
                Err(ParseError::MissingGreenhouse("heat"))
            } else {
                Ok(Command::Heat {
                    greenhouse: title_case(args),
                })
            }
        }
        "ventilate" => {
            if args.is_empty() {
                Err(ParseError::MissingGreenhouse("ventilate"))
            } else {
                Ok(Command::Ventilate {
                    greenhouse: title_case(args),
                })
            }
        }
        "pass" => Ok(Command::Pass),
        "help" => Ok(Command::Help),
        "status" => Ok(Command::Status),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn title_case(words: &[&str]) -> String {
    let mut out = String::new();
    for word in words {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

pub const HELP_TEXT: &str = "\
Commands:
  water <plant-id>            irrigate one plant up to its optimal maximum
                              (costs 1 L of water per 10% of missing moisture)
  heat <greenhouse name>      +2.0 C, -5% relative humidity, costs 5 kWh
  ventilate <greenhouse name> -2.0 C, +5% relative humidity, costs 3 kWh
  status                      optimal ranges and current compliance
  help                        this text
  pass                        end the turn and advance to the next day

Any number of commands may run in one turn; each one re-checks water and
energy against what is left.
";
