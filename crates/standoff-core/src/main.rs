//! Crisis Standoff Simulator
//!
//! Plays one encounter headless: a random player policy against the adaptive
//! opponent, logging every action until the encounter ends.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use standoff_core::{
    Encounter, EncounterConfig, EngineError, HistoryLogger, Phase, Resolution, Scenario,
    TacticalPosition,
};
use standoff_events::{ActionResult, Faction};

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "standoff_sim")]
#[command(about = "Headless crisis negotiation simulator")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Law-enforcement faction to play (fbi, cia, local_pd)
    #[arg(long, default_value = "fbi")]
    faction: String,

    /// Path to a TOML rules file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tactical position the player holds from the start (repeatable)
    #[arg(long = "secure", value_name = "POSITION")]
    secure: Vec<TacticalPosition>,

    /// Write every action result to this JSONL file
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Write the final situation as pretty JSON to this file
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();

    let faction: Faction = args
        .faction
        .parse()
        .map_err(|_| EngineError::UnknownFaction(args.faction.clone()))?;
    let config = match &args.config {
        Some(path) => EncounterConfig::from_file(path)?,
        None => EncounterConfig::default(),
    };
    let mut logger = match &args.history_out {
        Some(path) => HistoryLogger::new(path)?,
        None => HistoryLogger::null(),
    };

    println!("Crisis Standoff Simulator");
    println!("=========================");
    println!("Seed: {}", args.seed);
    println!("Faction: {}", faction);
    println!();

    let scenario = Scenario::default().with_secured_positions(args.secure.iter().copied());
    let mut encounter = Encounter::new(
        faction,
        &scenario,
        config,
        SmallRng::seed_from_u64(args.seed),
    )?;
    // Separate stream for the player policy
    let mut policy_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));

    println!(
        "{} vs {} at {}",
        encounter.state().player_faction,
        encounter.state().adversary_faction,
        scenario.name
    );

    while encounter.phase() != Phase::GameOver {
        let next = if encounter.player_turn_exhausted() {
            None
        } else {
            choose_action(&encounter, &mut policy_rng)
        };
        match next {
            Some(name) => match encounter.perform_action(&name)? {
                Resolution::Resolved(result) => {
                    report(&result);
                    logger.log(&result)?;
                }
                Resolution::Rejected(reason) => warn!(%reason, "Policy picked an invalid action"),
            },
            None => {
                let turn_report = encounter.end_player_turn()?;
                for result in &turn_report.adversary_actions {
                    report(result);
                }
                logger.log_batch(&turn_report.adversary_actions)?;
                for development in &turn_report.developments {
                    println!("  * {}", development);
                }
                if encounter.phase() == Phase::PlayerTurn {
                    println!();
                    println!("--- Turn {} ---", turn_report.new_turn);
                }
            }
        }
    }
    logger.flush()?;

    println!();
    println!("Objectives:");
    for objective in encounter.objectives() {
        let mark = if objective.complete {
            "x"
        } else if objective.failed {
            "!"
        } else {
            " "
        };
        println!("  [{}] {}", mark, objective.text);
    }

    let status = encounter.game_over_status();
    match (status.victory_kind, status.defeat_reason) {
        (Some(kind), _) => println!("VICTORY: {}", kind),
        (None, Some(reason)) => println!("DEFEAT: {}", reason),
        (None, None) => println!("Encounter unresolved"),
    }
    info!(
        turn = encounter.state().turn,
        actions = logger.result_count(),
        victory = status.victory,
        "Encounter finished"
    );

    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_string_pretty(encounter.state())?;
        fs::write(path, json)?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// Pick a random available action, or `None` to end the turn.
fn choose_action<R: Rng>(encounter: &Encounter<SmallRng>, rng: &mut R) -> Option<String> {
    let available: Vec<String> = encounter
        .available_actions()
        .into_values()
        .flatten()
        .map(|action| action.name.clone())
        .collect();
    available.choose(rng).cloned()
}

fn report(result: &ActionResult) {
    println!("  {}", result.summary());
    if let Some(line) = &result.dialogue_text {
        println!("    \"{}\"", line);
    }
    for description in &result.descriptions {
        println!("    - {}", description);
    }
}
