//! Mission Objectives
//!
//! Derived on request from the current state; nothing here is stored.

use standoff_events::Objective;

use crate::components::{Demand, HostageStatus, SituationState, TacticalPosition};

/// Thresholds used to judge objectives.
pub mod objective_thresholds {
    pub const CONTROL_COMPLETE_TENSION: f32 = 0.3;
    pub const CONTROL_FAILED_TENSION: f32 = 0.8;
    pub const TRUST_COMPLETE: f32 = 0.7;
    pub const TRUST_FAILED: f32 = 0.2;
    pub const OPINION_COMPLETE: f32 = 0.7;
    pub const OPINION_FAILED: f32 = 0.2;
}

/// Current objectives in priority order.
pub fn objectives(state: &SituationState) -> Vec<Objective> {
    use objective_thresholds::*;

    let total = state.total_hostages();
    let released = state.hostage_count(HostageStatus::Released);
    let killed = state.hostage_count(HostageStatus::Killed);
    let metrics = &state.metrics;

    let mut list = vec![
        Objective::new(format!("Rescue hostages ({released}/{total})"), 1)
            .with_complete(total > 0 && released == total)
            .with_failed(killed > 0),
        Objective::new(
            format!("Maintain control (Tension: {}%)", percent(metrics.tension)),
            2,
        )
        .with_complete(metrics.tension < CONTROL_COMPLETE_TENSION)
        .with_failed(metrics.tension >= CONTROL_FAILED_TENSION),
        Objective::new(format!("Build trust (Trust: {}%)", percent(metrics.trust)), 3)
            .with_complete(metrics.trust > TRUST_COMPLETE)
            .with_failed(metrics.trust <= TRUST_FAILED),
        Objective::new(
            format!(
                "Keep the public on side (Opinion: {}%)",
                percent(metrics.public_opinion)
            ),
            4,
        )
        .with_complete(metrics.public_opinion > OPINION_COMPLETE)
        .with_failed(metrics.public_opinion <= OPINION_FAILED),
    ];

    if state.hostage_deadline > 0 {
        let requested = state.demands.get(&Demand::Money).copied().unwrap_or(0);
        let met = state.demands_met.get(&Demand::Money).copied().unwrap_or(0);
        list.push(
            Objective::new(
                format!(
                    "Meet demands ({} turns remaining)",
                    state.hostage_deadline
                ),
                5,
            )
            .with_complete(met >= requested),
        );
    }

    if !state.is_secured(TacticalPosition::Surveillance) {
        list.push(Objective::new("Establish surveillance", 6));
    }

    list
}

fn percent(value: f32) -> u32 {
    (value * 100.0).round() as u32
}
