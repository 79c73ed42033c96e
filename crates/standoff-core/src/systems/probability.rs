//! Probability Model
//!
//! Effective success chance of an action given the current situation, and the
//! classification of a roll against that chance.

use standoff_events::{ActionCategory, OutcomeClass, Side};

use crate::actions::{category_profile, ActionDefinition};
use crate::components::{Condition, SituationState};

/// Modifiers and bounds for the success chance.
pub mod chance_weights {
    /// Lowest chance any action can have
    pub const MIN_CHANCE: f32 = 0.10;
    /// Highest chance any action can have
    pub const MAX_CHANCE: f32 = 0.95;

    /// Trust above this helps negotiation and tactical moves
    pub const HIGH_TRUST: f32 = 0.7;
    pub const HIGH_TRUST_BONUS: f32 = 0.05;

    /// Tension above this hurts force and specials
    pub const HIGH_TENSION: f32 = 0.7;
    pub const HIGH_TENSION_PENALTY: f32 = 0.05;

    /// Acting side's morale below this hurts specials
    pub const LOW_MORALE: f32 = 0.3;
    pub const LOW_MORALE_SPECIAL_PENALTY: f32 = 0.10;
    /// Acting side's morale above this helps everything
    pub const HIGH_MORALE: f32 = 0.7;
    pub const HIGH_MORALE_BONUS: f32 = 0.05;

    /// Same category right after a success
    pub const CHAIN_BONUS: f32 = 0.10;
    /// Negotiating right after a failed use of force
    pub const AFTER_FAILED_FORCE_PENALTY: f32 = 0.10;

    /// Tech while the power is out
    pub const POWER_OUTAGE_PENALTY: f32 = 0.15;
    /// Force while anything is burning
    pub const FIRE_PENALTY: f32 = 0.10;

    /// Rolls below chance times this are critical successes
    pub const CRITICAL_SUCCESS_FRACTION: f32 = 0.05;
    /// Successes within this margin of the chance are partial
    pub const PARTIAL_MARGIN: f32 = 0.10;
    /// Failed rolls above this are critical failures
    pub const CRITICAL_FAILURE_ROLL: f32 = 0.95;
}

/// Success chance after every situational modifier, clamped to
/// [`chance_weights::MIN_CHANCE`, `chance_weights::MAX_CHANCE`].
///
/// The acting side is the action's side; its morale and most recent history
/// entry feed the modifiers.
pub fn compute_effective_chance(action: &ActionDefinition, state: &SituationState) -> f32 {
    use chance_weights::*;

    let actor = action.side;
    let profile = category_profile(action.category);
    let metrics = &state.metrics;
    let mut chance = action.base_success_chance;

    if profile.trust_bonus && metrics.trust > HIGH_TRUST {
        chance += HIGH_TRUST_BONUS;
    }

    if (profile.tension_penalty || action.is_special) && metrics.tension > HIGH_TENSION {
        chance -= HIGH_TENSION_PENALTY;
    }

    let morale = metrics.morale_of(actor);
    if action.is_special && morale < LOW_MORALE {
        chance -= LOW_MORALE_SPECIAL_PENALTY;
    }
    if morale > HIGH_MORALE {
        chance += HIGH_MORALE_BONUS;
    }

    chance += chaining_modifier(action, state, actor);

    if profile.power_sensitive && !state.severity(Condition::Power).is_clear() {
        chance -= POWER_OUTAGE_PENALTY;
    }
    if profile.fire_sensitive && !state.severity(Condition::Fire).is_clear() {
        chance -= FIRE_PENALTY;
    }

    chance.clamp(MIN_CHANCE, MAX_CHANCE)
}

/// Synergy or penalty from the acting side's previous action.
fn chaining_modifier(action: &ActionDefinition, state: &SituationState, actor: Side) -> f32 {
    let Some(previous) = state.last_action_by(actor) else {
        return 0.0;
    };

    let mut modifier = 0.0;
    if previous.category == action.category && previous.succeeded() {
        modifier += chance_weights::CHAIN_BONUS;
    }
    if previous.category == ActionCategory::Force
        && !previous.succeeded()
        && category_profile(action.category).undermined_by_failed_force
    {
        modifier -= chance_weights::AFTER_FAILED_FORCE_PENALTY;
    }
    modifier
}

/// Classify a roll in [0, 1) against an effective chance.
pub fn classify_roll(roll: f32, chance: f32) -> OutcomeClass {
    use chance_weights::*;

    if roll < chance {
        if roll < chance * CRITICAL_SUCCESS_FRACTION {
            OutcomeClass::CriticalSuccess
        } else if roll > chance - PARTIAL_MARGIN {
            OutcomeClass::PartialSuccess
        } else {
            OutcomeClass::Success
        }
    } else if roll > CRITICAL_FAILURE_ROLL {
        OutcomeClass::CriticalFailure
    } else {
        OutcomeClass::Failure
    }
}
