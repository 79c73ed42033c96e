//! Encounter Setup
//!
//! Builds the opening situation from a player faction, a scenario, and the rules.

pub mod scenario;

pub use scenario::{HostageSeed, Scenario};

use standoff_events::{Faction, Side};
use tracing::info;

use crate::components::{Condition, Hostage, Severity, SiteKey, SituationState, TacticalPosition};
use crate::config::RulesConfig;
use crate::error::EngineError;

/// Opening state for `player` against its rival faction.
pub fn initial_state(
    player: Faction,
    scenario: &Scenario,
    rules: &RulesConfig,
) -> Result<SituationState, EngineError> {
    if player.side() != Side::LawEnforcement {
        return Err(EngineError::UnsupportedPlayerFaction(player));
    }
    let adversary = player.rival();

    let mut state = SituationState::new(player, adversary, rules.history_limit);
    state.max_turns = rules.max_turns;
    state.action_points = rules.base_action_points;
    state.adversary_action_points = rules.adversary_action_points;
    state.hostage_deadline = rules.hostage_deadline;
    state.killed_tolerance = rules.killed_tolerance;

    state.hostages = scenario
        .hostages
        .iter()
        .zip(1u32..)
        .map(|(seed, id)| {
            Hostage::new(id, seed.name.clone())
                .with_health(seed.health)
                .with_stress(seed.stress)
        })
        .collect();

    state.player_resources = scenario.player_resources.clone();
    state.player_personnel = scenario.player_personnel.clone();
    state.adversary_resources = scenario.adversary_resources.clone();
    state.adversary_personnel = scenario.adversary_personnel.clone();

    for &position in TacticalPosition::all() {
        let secured = scenario.secured_positions.contains(&position);
        state.tactical_positions.insert(position, secured);
    }
    for &condition in Condition::all() {
        state.environment.insert(condition, Severity::Clear);
    }

    state.demands = scenario.demands.clone();
    state.demands_met = scenario.demands.keys().map(|&demand| (demand, 0)).collect();

    info!(
        scenario = %scenario.name,
        %player,
        %adversary,
        hostages = state.total_hostages(),
        "Encounter set up"
    );

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Demand, HostageStatus, Resource, Role};

    #[test]
    fn test_bank_scenario_opening() {
        let state =
            initial_state(Faction::Fbi, &Scenario::default(), &RulesConfig::default()).unwrap();

        assert_eq!(state.adversary_faction, Faction::RedDragonTriad);
        assert_eq!(state.turn, 1);
        assert_eq!(state.action_points, 3);
        assert_eq!(state.adversary_action_points, 3);
        assert_eq!(state.hostage_deadline, 10);
        assert_eq!(state.total_hostages(), 8);
        assert_eq!(state.hostage_count(HostageStatus::Captured), 8);
        assert_eq!(state.hostages[1].health(), 70);
        assert_eq!(state.resource(Side::LawEnforcement, Resource::Money), 10);
        assert_eq!(state.personnel_count(Side::HostageTaker, Role::ArmedMember), 4);
        assert!(state.is_secured(TacticalPosition::NegotiationPoint));
        assert!(!state.is_secured(TacticalPosition::BreachPoints));
        assert_eq!(state.tactical_positions.len(), TacticalPosition::all().len());
        assert!(state.environment.values().all(|s| s.is_clear()));
        assert_eq!(state.demands.get(&Demand::Money), Some(&1_000_000));
        assert!(state.ransom_outstanding());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_rival_pairings() {
        let scenario = Scenario::default();
        let rules = RulesConfig::default();
        let cia = initial_state(Faction::Cia, &scenario, &rules).unwrap();
        assert_eq!(cia.adversary_faction, Faction::ShadowSyndicate);
        let local = initial_state(Faction::LocalPd, &scenario, &rules).unwrap();
        assert_eq!(local.adversary_faction, Faction::LiberationFront);
    }

    #[test]
    fn test_hostage_taker_cannot_be_the_player() {
        let err = initial_state(
            Faction::ShadowSyndicate,
            &Scenario::default(),
            &RulesConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedPlayerFaction(Faction::ShadowSyndicate)
        ));
    }
}
