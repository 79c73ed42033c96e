//! Action Resolution
//!
//! Validate, roll, classify, pay, shift the baseline metrics, apply
//! consequences, and record. A rejected attempt leaves the state untouched.

use rand::Rng;
use tracing::{debug, warn};

use standoff_events::{ActionResult, Faction, OutcomeClass, Side};

use crate::actions::profile::failure_shift;
use crate::actions::{category_profile, ActionDefinition, MetricShift};
use crate::components::{Metric, SituationState};
use crate::config::RulesConfig;
use crate::error::Rejection;

use super::consequence::apply_consequences;
use super::probability::{classify_roll, compute_effective_chance};
use super::termination::check_termination;

/// Outcome of an attempt: either resolved with a result or refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ActionResult),
    Rejected(Rejection),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn result(&self) -> Option<&ActionResult> {
        match self {
            Resolution::Resolved(result) => Some(result),
            Resolution::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Check every precondition without touching the state.
pub fn validate(
    action: &ActionDefinition,
    faction: Faction,
    state: &SituationState,
) -> Result<(), Rejection> {
    if state.is_game_over() {
        return Err(Rejection::EncounterOver);
    }

    let available = state.action_points_of(faction.side());
    if available < action.action_point_cost {
        return Err(Rejection::InsufficientActionPoints {
            action: action.name.clone(),
            required: action.action_point_cost,
            available,
        });
    }

    let turns_remaining = state.cooldown_remaining(&action.name);
    if turns_remaining > 0 {
        return Err(Rejection::ActionOnCooldown {
            action: action.name.clone(),
            turns_remaining,
        });
    }

    if action.is_special && state.used_special_abilities.contains(&action.name) {
        return Err(Rejection::SpecialAbilityAlreadyUsed {
            action: action.name.clone(),
        });
    }

    if !action.usable_by(faction) {
        return Err(Rejection::FactionIneligible {
            action: action.name.clone(),
            faction,
        });
    }

    if let Some(requirement) = action.unmet_requirement(state, action.side) {
        return Err(Rejection::RequirementsNotMet {
            action: action.name.clone(),
            requirement: requirement.describe(),
        });
    }

    Ok(())
}

/// Resolve one attempt by `faction`.
pub fn resolve<R: Rng + ?Sized>(
    action: &ActionDefinition,
    faction: Faction,
    state: &mut SituationState,
    rules: &RulesConfig,
    rng: &mut R,
) -> Resolution {
    if let Err(rejection) = validate(action, faction, state) {
        warn!(action = %action.name, %faction, reason = %rejection, "Action rejected");
        return Resolution::Rejected(rejection);
    }

    let actor = action.side;
    let chance = compute_effective_chance(action, state);
    let roll: f32 = rng.gen();
    let outcome = classify_roll(roll, chance);
    debug!(
        action = %action.name,
        %faction,
        roll,
        chance,
        %outcome,
        "Action resolved"
    );

    let points = state.action_points_mut(actor);
    *points = points.saturating_sub(action.action_point_cost);

    if action.action_point_cost >= rules.cooldown_cost_threshold || outcome.is_critical() {
        state
            .cooldowns
            .insert(action.name.clone(), rules.cooldown_turns);
    }

    let mut descriptions = apply_baseline(action, actor, state, outcome);
    descriptions.extend(apply_consequences(action, state, outcome, rng));

    if action.is_special {
        state.used_special_abilities.insert(action.name.clone());
    }

    let result = ActionResult {
        turn: state.turn,
        actor,
        faction,
        action: action.name.clone(),
        category: action.category,
        outcome,
        roll,
        effective_chance: chance,
        ap_charged: action.action_point_cost,
        descriptions,
        dialogue_text: action.dialogue_text.clone(),
    };
    state.push_history(result.clone());
    check_termination(state);

    Resolution::Resolved(result)
}

/// Category baseline shift: the profile's success shift (scaled for critical
/// and partial successes), or the failure penalty.
fn apply_baseline(
    action: &ActionDefinition,
    actor: Side,
    state: &mut SituationState,
    outcome: OutcomeClass,
) -> Vec<String> {
    let shift = match outcome {
        OutcomeClass::CriticalSuccess => category_profile(action.category)
            .success_shift(actor)
            .scaled(1.5),
        OutcomeClass::Success => category_profile(action.category).success_shift(actor),
        OutcomeClass::PartialSuccess => category_profile(action.category)
            .success_shift(actor)
            .scaled(0.5),
        OutcomeClass::Failure => MetricShift::new(
            0.0,
            failure_shift::TENSION,
            failure_shift::OWN_MORALE,
            0.0,
        ),
        OutcomeClass::CriticalFailure => MetricShift::new(
            0.0,
            failure_shift::TENSION * failure_shift::CRITICAL_MULTIPLIER,
            failure_shift::OWN_MORALE,
            0.0,
        ),
    };

    let mut descriptions = Vec::new();
    for (metric, delta, label) in [
        (Metric::Trust, shift.trust, "Trust"),
        (Metric::Tension, shift.tension, "Tension"),
        (Metric::morale_of(actor), shift.own_morale, "Morale"),
        (
            Metric::morale_of(actor.opposing()),
            shift.opposing_morale,
            "Opposing morale",
        ),
    ] {
        if delta == 0.0 {
            continue;
        }
        let applied = state.metrics.shift(metric, delta);
        if applied != 0.0 {
            descriptions.push(format!("{label} {applied:+.2}"));
        }
    }
    descriptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Catalog, Consequence};
    use crate::components::{Hostage, HostageStatus, Role};
    use rand::rngs::mock::StepRng;
    use standoff_events::{ActionCategory, EncounterOutcome, VictoryKind};

    /// Mock source whose every `gen::<f32>()` yields `value`.
    fn fixed_roll(value: f32) -> StepRng {
        let bits = ((value * (1u32 << 24) as f32) as u32) << 8;
        StepRng::new(bits as u64, 0)
    }

    fn fbi_state() -> SituationState {
        let mut state = SituationState::new(Faction::Fbi, Faction::RedDragonTriad, 100);
        state.action_points = 3;
        state.adversary_action_points = 3;
        state.hostages = (1..=8).map(|id| Hostage::new(id, format!("H{id}"))).collect();
        state.adversary_personnel.insert(Role::ArmedMember, 4);
        state
    }

    #[test]
    fn test_fixed_roll_helper() {
        let mut rng = fixed_roll(0.10);
        let value: f32 = rng.gen();
        assert!((value - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_open_communication_raises_trust() {
        let catalog = Catalog::standard();
        let action = catalog.get("Open Communication").unwrap();
        let mut state = fbi_state();
        let mut rng = fixed_roll(0.10);

        let resolution = resolve(action, Faction::Fbi, &mut state, &RulesConfig::default(), &mut rng);
        let result = resolution.result().expect("resolved");
        assert_eq!(result.outcome, OutcomeClass::Success);
        assert_eq!(result.ap_charged, 1);
        assert_eq!(state.action_points, 2);
        assert!(state.metrics.trust >= 0.55 && state.metrics.trust <= 0.60);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_unaffordable_action_leaves_state_untouched() {
        let catalog = Catalog::standard();
        let action = catalog.get("Position Snipers").unwrap();
        let mut state = fbi_state();
        state.action_points = 2;
        state.player_personnel.insert(Role::Sniper, 2);
        let trust = state.metrics.trust;
        let mut rng = fixed_roll(0.10);

        let resolution = resolve(action, Faction::Fbi, &mut state, &RulesConfig::default(), &mut rng);
        assert!(matches!(
            resolution,
            Resolution::Rejected(Rejection::InsufficientActionPoints {
                required: 3,
                available: 2,
                ..
            })
        ));
        assert_eq!(state.action_points, 2);
        assert_eq!(state.metrics.trust, trust);
        assert!(state.history().is_empty());
        assert!(state.cooldowns.is_empty());
    }

    #[test]
    fn test_wrong_faction_is_rejected() {
        let catalog = Catalog::standard();
        let action = catalog.get("Shadow Protocol").unwrap();
        let mut state = fbi_state();
        let resolution = resolve(
            action,
            Faction::Fbi,
            &mut state,
            &RulesConfig::default(),
            &mut fixed_roll(0.1),
        );
        assert_eq!(resolution.rejection().map(|r| r.code()), Some("faction_ineligible"));
    }

    #[test]
    fn test_expensive_actions_go_on_cooldown() {
        let action = ActionDefinition::new(
            "Heavy Lift",
            Side::LawEnforcement,
            ActionCategory::Resources,
            3,
            0.9,
        );
        let mut state = fbi_state();
        let rules = RulesConfig::default();
        resolve(&action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.5));
        assert_eq!(state.cooldown_remaining("Heavy Lift"), 3);

        state.action_points = 3;
        let again = resolve(&action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.5));
        assert!(matches!(
            again,
            Resolution::Rejected(Rejection::ActionOnCooldown { turns_remaining: 3, .. })
        ));
    }

    #[test]
    fn test_special_once_per_turn() {
        let catalog = Catalog::standard();
        let action = catalog.get("Rapid Response Team").unwrap();
        let mut state = fbi_state();
        state
            .player_resources
            .insert(crate::components::Resource::Manpower, 5);
        let rules = RulesConfig::default();
        assert!(resolve(action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.5)).is_resolved());
        let second = resolve(action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.5));
        assert_eq!(
            second.rejection().map(|r| r.code()),
            Some("special_ability_already_used")
        );
    }

    #[test]
    fn test_failure_raises_tension_and_lowers_morale() {
        let action = ActionDefinition::new(
            "Long Shot",
            Side::LawEnforcement,
            ActionCategory::Dialogue,
            1,
            0.2,
        );
        let mut state = fbi_state();
        state.metrics.morale = 0.5;
        resolve(&action, Faction::Fbi, &mut state, &RulesConfig::default(), &mut fixed_roll(0.5));
        assert!((state.metrics.tension - 0.65).abs() < 1e-5);
        assert!((state.metrics.morale - 0.45).abs() < 1e-5);
    }

    #[test]
    fn test_victory_latches_mid_turn() {
        let action = ActionDefinition::new(
            "Mass Release",
            Side::LawEnforcement,
            ActionCategory::Negotiation,
            1,
            0.9,
        )
        .consequence(Consequence::release(8));
        let mut state = fbi_state();
        let rules = RulesConfig::default();
        resolve(&action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.3));
        assert_eq!(state.hostage_count(HostageStatus::Released), 8);
        assert_eq!(
            state.outcome(),
            Some(EncounterOutcome::Victory(VictoryKind::AllHostagesReleased))
        );

        let after = resolve(&action, Faction::Fbi, &mut state, &rules, &mut fixed_roll(0.3));
        assert_eq!(after, Resolution::Rejected(Rejection::EncounterOver));
    }

    #[test]
    fn test_outcome_judged_after_all_consequences() {
        // The force baseline maxes tension; the same action takes down the crew
        let action = ActionDefinition::new(
            "Storm the Vault",
            Side::LawEnforcement,
            ActionCategory::Force,
            1,
            0.9,
        )
        .consequence(Consequence::adversary_personnel(Role::ArmedMember, -4));
        let mut state = fbi_state();
        state.metrics.tension = 0.9;

        let resolution = resolve(
            &action,
            Faction::Fbi,
            &mut state,
            &RulesConfig::default(),
            &mut fixed_roll(0.3),
        );
        assert_eq!(resolution.result().map(|r| r.outcome), Some(OutcomeClass::Success));
        assert_eq!(state.metrics.tension, 1.0);
        assert_eq!(state.total_personnel(Side::HostageTaker), 0);
        assert_eq!(
            state.outcome(),
            Some(EncounterOutcome::Victory(VictoryKind::AdversaryNeutralized))
        );
    }
}
