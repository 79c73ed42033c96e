//! Termination Checks
//!
//! Victory and defeat conditions, evaluated in a fixed order after every state
//! mutation. The first satisfied condition is latched into the state.

use tracing::info;

use standoff_events::{DefeatReason, EncounterOutcome, Side, VictoryKind};

use crate::components::{HostageStatus, SituationState};

/// Thresholds for the peaceful-surrender victory.
pub mod surrender_thresholds {
    /// Trust must exceed this
    pub const MIN_TRUST: f32 = 0.8;
    /// Tension must be below this
    pub const MAX_TENSION: f32 = 0.3;
    /// Adversary morale must be below this
    pub const MAX_ADVERSARY_MORALE: f32 = 0.3;
}

/// Which outcome, if any, the state currently satisfies. Pure.
pub fn evaluate(state: &SituationState) -> Option<EncounterOutcome> {
    use surrender_thresholds::*;

    let total = state.total_hostages();
    let released = state.hostage_count(HostageStatus::Released);
    let killed = state.hostage_count(HostageStatus::Killed);
    let metrics = &state.metrics;

    if total > 0 && released == total {
        return Some(EncounterOutcome::Victory(VictoryKind::AllHostagesReleased));
    }
    if metrics.trust > MIN_TRUST
        && metrics.tension < MAX_TENSION
        && metrics.adversary_morale < MAX_ADVERSARY_MORALE
    {
        return Some(EncounterOutcome::Victory(VictoryKind::PeacefulSurrender));
    }
    if state.total_personnel(Side::HostageTaker) == 0 {
        return Some(EncounterOutcome::Victory(VictoryKind::AdversaryNeutralized));
    }
    if killed as u32 > state.killed_tolerance {
        return Some(EncounterOutcome::Defeat(DefeatReason::HostagesKilled));
    }
    if metrics.tension >= 1.0 {
        return Some(EncounterOutcome::Defeat(DefeatReason::SituationEscalated));
    }
    if state.turn > state.max_turns {
        return Some(EncounterOutcome::Defeat(DefeatReason::TimeRanOut));
    }
    if state.hostage_deadline <= 0 && state.ransom_outstanding() {
        return Some(EncounterOutcome::Defeat(DefeatReason::DeadlineExpired));
    }
    None
}

/// Evaluate and latch. Returns the (possibly earlier) latched outcome.
pub fn check_termination(state: &mut SituationState) -> Option<EncounterOutcome> {
    if let Some(existing) = state.outcome() {
        return Some(existing);
    }
    let outcome = evaluate(state)?;
    let latched = state.latch_outcome(outcome);
    match latched {
        EncounterOutcome::Victory(kind) => info!(turn = state.turn, %kind, "Encounter won"),
        EncounterOutcome::Defeat(reason) => info!(turn = state.turn, %reason, "Encounter lost"),
    }
    Some(latched)
}
