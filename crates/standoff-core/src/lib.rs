//! Crisis Standoff Engine Library
//!
//! Turn-based hostage negotiation: a law-enforcement player and an adaptive
//! hostage-taker opponent spend action points on probabilistic actions that
//! reshape a shared situation until one side wins.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use standoff_events::Faction;

pub mod actions;
pub mod components;
pub mod config;
pub mod encounter;
pub mod error;
pub mod events;
pub mod setup;
pub mod systems;

pub use components::*;

pub use actions::{ActionDefinition, Catalog, Consequence, ConsequenceKind, Requirement};
pub use config::{default_config_toml, ConfigError, EncounterConfig};
pub use encounter::{Encounter, Phase, TurnReport};
pub use error::{EngineError, Rejection};
pub use events::HistoryLogger;
pub use setup::Scenario;
pub use systems::{AdaptiveOpponent, Archetype, Resolution};

/// Start the bank scenario with default rules and a seeded random source.
pub fn new_encounter(player_faction: Faction, seed: u64) -> Result<Encounter<SmallRng>, EngineError> {
    Encounter::new(
        player_faction,
        &Scenario::default(),
        EncounterConfig::default(),
        SmallRng::seed_from_u64(seed),
    )
}
