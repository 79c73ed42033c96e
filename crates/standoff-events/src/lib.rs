//! Shared encounter types for the crisis standoff engine.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the engine and for any front end that renders
//! an encounter.

pub mod category;
pub mod faction;
pub mod result;
pub mod status;

// Re-export faction types
pub use faction::{Faction, ParseFactionError, Side};

// Re-export category types
pub use category::ActionCategory;

// Re-export result types
pub use result::{ActionResult, HistoryEntry, OutcomeClass};

// Re-export status types
pub use status::{DefeatReason, EncounterOutcome, GameOverStatus, Objective, VictoryKind};
