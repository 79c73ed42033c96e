//! Engine Systems
//!
//! Probability, consequences, resolution, termination, end-of-turn upkeep,
//! objectives, and the adaptive opponent.

pub mod consequence;
pub mod objectives;
pub mod opponent;
pub mod probability;
pub mod resolution;
pub mod termination;
pub mod upkeep;

// Re-export commonly used systems
pub use consequence::apply_consequences;
pub use objectives::objectives;
pub use opponent::{action_weight, weighted_choice, AdaptiveOpponent, Archetype, WeightedAction};
pub use probability::{classify_roll, compute_effective_chance};
pub use resolution::{resolve, validate, Resolution};
pub use termination::{check_termination, evaluate};
pub use upkeep::end_turn_processing;
