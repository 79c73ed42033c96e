//! End-of-Turn Upkeep
//!
//! Turn advance, action point refresh, cooldown decay, the deadline countdown,
//! situation drift, and passive hostage deterioration.

use rand::Rng;
use tracing::{debug, info};

use crate::components::{HostageStatus, Metric, SituationState};
use crate::config::EncounterConfig;

use super::termination::check_termination;

/// Constants for situation drift between turns.
pub mod drift_weights {
    /// Deadline at or below this raises tension
    pub const DEADLINE_PRESSURE_TURNS: i32 = 2;
    /// Tension added while the deadline is close
    pub const DEADLINE_PRESSURE_TENSION: f32 = 0.1;
    /// Chance per turn that the mood drifts
    pub const DRIFT_CHANCE: f32 = 0.3;
    /// Tension above this feeds on itself
    pub const RISING_TENSION: f32 = 0.7;
    pub const TENSION_DRIFT: f32 = 0.05;
    /// Trust above this wears down the hostage takers
    pub const HIGH_TRUST: f32 = 0.7;
    pub const ADVERSARY_MORALE_DRIFT: f32 = -0.1;
}

/// Advance to the next turn. Returns the developments worth reporting.
pub fn end_turn_processing<R: Rng + ?Sized>(
    state: &mut SituationState,
    config: &EncounterConfig,
    rng: &mut R,
) -> Vec<String> {
    use drift_weights::*;

    let rules = &config.rules;
    let mut developments = Vec::new();

    state.turn += 1;
    state.action_points = rules.base_action_points + state.bonus_action_points;
    state.bonus_action_points = 0;
    state.adversary_action_points = rules.adversary_action_points;
    state.tick_cooldowns();

    state.hostage_deadline -= 1;
    if state.hostage_deadline <= DEADLINE_PRESSURE_TURNS {
        state.metrics.shift(Metric::Tension, DEADLINE_PRESSURE_TENSION);
        developments.push(format!(
            "Deadline pressure mounts: {} turn(s) left",
            state.hostage_deadline.max(0)
        ));
    }

    if rng.gen::<f32>() < DRIFT_CHANCE {
        if state.metrics.tension > RISING_TENSION {
            state.metrics.shift(Metric::Tension, TENSION_DRIFT);
            developments.push("Tension continues to rise".to_string());
        }
        if state.metrics.trust > HIGH_TRUST {
            state.metrics.shift(Metric::AdversaryMorale, ADVERSARY_MORALE_DRIFT);
            developments.push("The hostage takers are losing their resolve".to_string());
        }
    }

    developments.extend(deteriorate_hostages(state, config, rng));

    state.used_special_abilities.clear();

    info!(
        turn = state.turn,
        action_points = state.action_points,
        deadline = state.hostage_deadline,
        tension = state.metrics.tension,
        "Turn advanced"
    );

    check_termination(state);
    developments
}

fn deteriorate_hostages<R: Rng + ?Sized>(
    state: &mut SituationState,
    config: &EncounterConfig,
    rng: &mut R,
) -> Vec<String> {
    let rules = &config.deterioration;
    let mut developments = Vec::new();

    if state.metrics.tension >= rules.high_tension
        && rng.gen::<f32>() < rules.high_tension_wound_chance
    {
        let captured: Vec<usize> = state
            .hostages
            .iter()
            .enumerate()
            .filter(|(_, h)| h.status() == HostageStatus::Captured)
            .map(|(index, _)| index)
            .collect();
        if !captured.is_empty() {
            let pick = rng.gen_range(0..captured.len());
            let hostage = &mut state.hostages[captured[pick]];
            if hostage.wound().is_ok() {
                developments.push(format!("{} was hurt in the confusion", hostage.name));
            }
        }
    }

    for hostage in state.hostages.iter_mut() {
        if !hostage.status().is_active() {
            continue;
        }
        hostage.add_stress(rules.stress_per_turn);
        if hostage.stress() >= rules.stress_threshold
            && rng.gen::<f32>() < rules.health_loss_chance
        {
            hostage.lose_health(rules.health_loss);
            debug!(hostage = %hostage.name, health = hostage.health(), "Hostage health declining");
            if hostage.status() == HostageStatus::Captured
                && hostage.health() < rules.wound_health
                && hostage.transition(HostageStatus::Wounded).is_ok()
            {
                developments.push(format!("{}'s condition has worsened", hostage.name));
            }
        }
    }

    developments
}
