//! Consequence System
//!
//! Applies an action's consequence list to the situation. Every consequence
//! rolls its own probability (in list order, before the outcome gate) so the
//! number of draws per resolution does not depend on the outcome.

use rand::Rng;
use tracing::debug;

use standoff_events::{OutcomeClass, Side};

use crate::actions::{ActionDefinition, Consequence, ConsequenceKind, HostageEffect};
use crate::components::{HostageStatus, Metric, SituationState};

/// Lowest deadline a deadline shift can leave behind
pub const MIN_SHIFTED_DEADLINE: i32 = 1;

/// Apply every consequence of `action` for the given outcome. Returns one
/// description per change that actually happened.
pub fn apply_consequences<R: Rng + ?Sized>(
    action: &ActionDefinition,
    state: &mut SituationState,
    outcome: OutcomeClass,
    rng: &mut R,
) -> Vec<String> {
    let actor = action.side;
    let mut descriptions = Vec::new();

    for consequence in &action.consequences {
        let roll: f32 = rng.gen();
        if roll >= consequence.probability {
            continue;
        }
        if !consequence.trigger.fires_on(outcome) {
            continue;
        }
        if let Some(description) = apply_one(consequence, actor, state, outcome, rng) {
            debug!(action = %action.name, change = %description, "Consequence applied");
            descriptions.push(description);
        }
    }

    descriptions
}

fn scaled(amount: i32, outcome: OutcomeClass) -> i32 {
    (amount as f32 * outcome.effect_multiplier()).round() as i32
}

fn apply_one<R: Rng + ?Sized>(
    consequence: &Consequence,
    actor: Side,
    state: &mut SituationState,
    outcome: OutcomeClass,
    rng: &mut R,
) -> Option<String> {
    match &consequence.kind {
        ConsequenceKind::ResourceDelta { resource, amount } => {
            let delta = scaled(*amount, outcome);
            let now = state.modify_resource(actor, *resource, delta);
            Some(format!("{} {}: {:+} (now {})", actor, resource, delta, now))
        }
        ConsequenceKind::PersonnelDelta { role, amount } => {
            let delta = scaled(*amount, outcome);
            let now = state.modify_personnel(actor, *role, delta);
            Some(format!("{} {}: {:+} (now {})", actor, role, delta, now))
        }
        ConsequenceKind::AdversaryResourceDelta { resource, amount } => {
            let delta = scaled(*amount, outcome);
            let now = state.modify_resource(Side::HostageTaker, *resource, delta);
            Some(format!("Hostage taker {}: {:+} (now {})", resource, delta, now))
        }
        ConsequenceKind::AdversaryPersonnelDelta { role, amount } => {
            let delta = scaled(*amount, outcome);
            let now = state.modify_personnel(Side::HostageTaker, *role, delta);
            Some(format!("Hostage taker {}: {:+} (now {})", role, delta, now))
        }
        ConsequenceKind::HostageEffect {
            effect,
            count,
            required_status,
        } => apply_hostage_effect(state, *effect, *count, *required_status, rng),
        ConsequenceKind::EnvironmentalChange { condition, severity } => {
            state.environment.insert(*condition, *severity);
            Some(format!("{} is now {}", condition, severity))
        }
        ConsequenceKind::TacticalPositionSet { position, secured } => {
            state.tactical_positions.insert(*position, *secured);
            if *secured {
                Some(format!("{} secured", position))
            } else {
                Some(format!("{} lost", position))
            }
        }
        ConsequenceKind::DeadlineShift { turns } => {
            let before = state.hostage_deadline;
            let shifted = before + turns;
            state.hostage_deadline = if *turns < 0 {
                shifted.max(MIN_SHIFTED_DEADLINE.min(before))
            } else {
                shifted
            };
            Some(format!(
                "Deadline: {} turn(s) remaining",
                state.hostage_deadline
            ))
        }
        ConsequenceKind::PublicOpinionChange { delta } => {
            state.metrics.shift(Metric::PublicOpinion, *delta);
            Some(format!("Public opinion {:+.2}", delta))
        }
        ConsequenceKind::MetricShift { target, delta } => {
            let metric = target.for_actor(actor);
            state.metrics.shift(metric, *delta);
            Some(format!("{:?} {:+.2}", metric, delta))
        }
        ConsequenceKind::BonusActionPoints { amount } => {
            state.bonus_action_points += amount;
            Some(format!("+{} action point(s) next turn", amount))
        }
        ConsequenceKind::DemandEscalation { demand, amount } => {
            let requested = state.demands.entry(*demand).or_insert(0);
            *requested = requested.saturating_add(*amount);
            Some(format!("Demand for {} raised to {}", demand, requested))
        }
        ConsequenceKind::DemandConcession { demand, amount } => {
            let met = state.demands_met.entry(*demand).or_insert(0);
            *met = met.saturating_add(*amount);
            Some(format!("Conceded {} {} ({} met)", amount, demand, met))
        }
    }
}

/// Pick up to `count` hostages uniformly without replacement among those in
/// `required_status` that may legally take the effect.
fn apply_hostage_effect<R: Rng + ?Sized>(
    state: &mut SituationState,
    effect: HostageEffect,
    count: u32,
    required_status: HostageStatus,
    rng: &mut R,
) -> Option<String> {
    let target = effect.target_status();
    let mut pool: Vec<usize> = state
        .hostages
        .iter()
        .enumerate()
        .filter(|(_, h)| h.status() == required_status && h.status().can_become(target))
        .map(|(index, _)| index)
        .collect();

    let mut affected = Vec::new();
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let pick = rng.gen_range(0..pool.len());
        let index = pool.swap_remove(pick);
        let hostage = &mut state.hostages[index];
        let changed = match effect {
            HostageEffect::Wound => hostage.wound(),
            HostageEffect::Release | HostageEffect::Kill => hostage.transition(target),
        };
        if changed.is_ok() {
            affected.push(hostage.name.clone());
        }
    }

    if affected.is_empty() {
        return None;
    }
    Some(format!("{} {}", affected.join(", "), target))
}
