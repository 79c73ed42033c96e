//! Opponent Action Selection
//!
//! Behavior-weighted scoring of candidate actions and the weighted random
//! chooser that picks among them.

use rand::Rng;

use crate::actions::{category_profile, ActionDefinition, ConsequenceKind, HostageEffect};
use crate::components::SituationState;

use super::Archetype;

/// Weight constants for opponent selection
pub mod selection_weights {
    /// Starting weight of every candidate
    pub const BASE: f32 = 1.0;
    /// Desperate opponents reach for lethal options
    pub const DESPERATE_LETHAL: f32 = 4.0;
    /// Lower bound of the erratic multiplier
    pub const ERRATIC_MIN: f32 = 0.5;
    /// Width of the erratic multiplier range (up to 2.0)
    pub const ERRATIC_SPAN: f32 = 1.5;

    /// Adversary morale below this triggers the low-morale weights
    pub const LOW_MORALE: f32 = 0.3;
    /// Tension above this triggers the high-tension weights
    pub const HIGH_TENSION: f32 = 0.7;
    /// Trust below this triggers the low-trust weights
    pub const LOW_TRUST: f32 = 0.3;
}

/// A candidate action and its selection weight.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAction<'a> {
    pub action: &'a ActionDefinition,
    pub weight: f32,
}

/// True if the action can kill a hostage when it succeeds.
pub fn is_lethal(action: &ActionDefinition) -> bool {
    action.consequences.iter().any(|c| {
        matches!(
            c.kind,
            ConsequenceKind::HostageEffect {
                effect: HostageEffect::Kill,
                ..
            }
        ) && c.trigger.fires_on(standoff_events::OutcomeClass::Success)
    })
}

/// Selection weight for one candidate under the given archetype.
///
/// The erratic archetype draws one random multiplier per call.
pub fn action_weight<R: Rng + ?Sized>(
    action: &ActionDefinition,
    archetype: Archetype,
    state: &SituationState,
    rng: &mut R,
) -> f32 {
    use selection_weights::*;

    let profile = category_profile(action.category);
    let mut weight = BASE;

    weight *= match archetype {
        Archetype::Aggressive => profile.archetype.aggressive,
        Archetype::Defensive => profile.archetype.defensive,
        Archetype::Calculating => profile.archetype.calculating,
        Archetype::Desperate => profile.archetype.desperate,
        Archetype::Erratic => ERRATIC_MIN + rng.gen::<f32>() * ERRATIC_SPAN,
    };
    if archetype == Archetype::Desperate && is_lethal(action) {
        weight *= DESPERATE_LETHAL;
    }

    let metrics = &state.metrics;
    if metrics.adversary_morale < LOW_MORALE {
        weight *= profile.situation.low_morale;
    }
    if metrics.tension > HIGH_TENSION {
        weight *= profile.situation.high_tension;
    }
    if metrics.trust < LOW_TRUST {
        weight *= profile.situation.low_trust;
    }

    weight
}

/// Perform weighted random selection. `None` if there are no candidates or
/// no positive weight.
pub fn weighted_choice<'a, 'b, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'b [WeightedAction<'a>],
) -> Option<&'b WeightedAction<'a>> {
    let total_weight: f32 = candidates.iter().map(|c| c.weight.max(0.0)).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mut roll: f32 = rng.gen::<f32>() * total_weight;
    for candidate in candidates {
        let weight = candidate.weight.max(0.0);
        if roll < weight {
            return Some(candidate);
        }
        roll -= weight;
    }

    // Float rounding can leave a sliver past the last bucket
    candidates.iter().rev().find(|c| c.weight > 0.0)
}
