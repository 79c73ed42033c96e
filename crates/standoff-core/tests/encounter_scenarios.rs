//! Encounter scenario tests
//!
//! Drives whole encounters through the public API.

use rand::rngs::mock::StepRng;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use standoff_core::{
    new_encounter, ActionDefinition, Catalog, Consequence, Encounter, EncounterConfig,
    EngineError, HostageStatus, Phase, Rejection, Resolution, Scenario, SituationState,
};
use standoff_events::{ActionCategory, Faction, Side, VictoryKind};

/// Mock source whose every `gen::<f32>()` yields `value`.
fn fixed_roll(value: f32) -> StepRng {
    let bits = ((value * (1u32 << 24) as f32) as u32) << 8;
    StepRng::new(bits as u64, 0)
}

fn fixed_encounter(value: f32) -> Encounter<StepRng> {
    Encounter::new(
        Faction::Fbi,
        &Scenario::default(),
        EncounterConfig::default(),
        fixed_roll(value),
    )
    .unwrap()
}

fn assert_bounded(state: &SituationState) {
    let metrics = &state.metrics;
    for value in [
        metrics.trust,
        metrics.tension,
        metrics.morale,
        metrics.adversary_morale,
        metrics.public_opinion,
    ] {
        assert!((0.0..=1.0).contains(&value), "metric out of range: {value}");
    }
    for hostage in &state.hostages {
        assert!(hostage.health() <= 100 && hostage.stress() <= 100);
        if hostage.status() == HostageStatus::Killed {
            assert_eq!(hostage.health(), 0);
        }
    }
}

#[test]
fn test_open_communication_builds_trust() {
    let mut encounter = fixed_encounter(0.10);
    assert_eq!(encounter.state().action_points, 3);

    let resolution = encounter.perform_action("Open Communication").unwrap();
    let result = resolution.result().expect("resolved");

    assert!(result.succeeded());
    assert_eq!(result.ap_charged, 1);
    assert_eq!(result.actor, Side::LawEnforcement);
    let trust = encounter.state().metrics.trust;
    assert!((0.55..=0.60).contains(&trust), "trust was {trust}");
    assert_eq!(encounter.state().action_points, 2);
    assert_eq!(encounter.history().len(), 1);
}

#[test]
fn test_unaffordable_action_leaves_state_untouched() {
    let mut encounter = fixed_encounter(0.10);
    encounter.perform_action("Open Communication").unwrap();
    let before = serde_json::to_string(encounter.state()).unwrap();

    let resolution = encounter.perform_action("Position Snipers").unwrap();
    assert_eq!(
        resolution,
        Resolution::Rejected(Rejection::InsufficientActionPoints {
            action: "Position Snipers".to_string(),
            required: 3,
            available: 2,
        })
    );
    assert_eq!(serde_json::to_string(encounter.state()).unwrap(), before);
    assert_eq!(encounter.phase(), Phase::PlayerTurn);
}

#[test]
fn test_available_actions_track_points() {
    let mut encounter = fixed_encounter(0.10);
    encounter.perform_action("Open Communication").unwrap();

    let available = encounter.available_actions();
    for action in available.values().flatten() {
        assert!(action.action_point_cost <= 2, "{} listed", action.name);
    }
    // Open Communication is not on cooldown after a plain success
    assert!(available
        .get(&ActionCategory::Dialogue)
        .is_some_and(|actions| actions.iter().any(|a| a.name == "Open Communication")));
}

#[test]
fn test_special_abilities_once_per_turn() {
    let mut encounter = Encounter::new(
        Faction::Cia,
        &Scenario::default(),
        EncounterConfig::default(),
        fixed_roll(0.30),
    )
    .unwrap();

    let first = encounter.perform_action("Covert Intelligence").unwrap();
    assert!(first.is_resolved());
    let second = encounter.perform_action("Covert Intelligence").unwrap();
    assert_eq!(
        second.rejection(),
        Some(&Rejection::SpecialAbilityAlreadyUsed {
            action: "Covert Intelligence".to_string(),
        })
    );

    let other_faction = encounter.perform_action("Rapid Response Team").unwrap();
    assert_eq!(
        other_faction.rejection(),
        Some(&Rejection::FactionIneligible {
            action: "Rapid Response Team".to_string(),
            faction: Faction::Cia,
        })
    );
}

#[test]
fn test_spent_points_exhaust_the_player_turn() {
    let mut encounter = fixed_encounter(0.10);
    assert!(!encounter.player_turn_exhausted());

    for _ in 0..3 {
        let resolution = encounter.perform_action("Open Communication").unwrap();
        assert!(resolution.is_resolved());
    }

    assert_eq!(encounter.state().action_points, 0);
    assert!(encounter.player_turn_exhausted());
    assert_eq!(encounter.phase(), Phase::PlayerTurn);
    assert!(encounter.available_actions().is_empty());

    let refused = encounter.perform_action("Open Communication").unwrap();
    assert!(matches!(
        refused.rejection(),
        Some(Rejection::InsufficientActionPoints { available: 0, .. })
    ));

    encounter.end_player_turn().unwrap();
    if encounter.phase() == Phase::PlayerTurn {
        assert!(!encounter.player_turn_exhausted());
    }
}

#[test]
fn test_player_must_be_law_enforcement() {
    let err = new_encounter(Faction::LiberationFront, 7).err().expect("rejected");
    assert!(matches!(
        err,
        EngineError::UnsupportedPlayerFaction(Faction::LiberationFront)
    ));
}

#[test]
fn test_releasing_everyone_wins_mid_turn() {
    let catalog = Catalog::new(vec![ActionDefinition::new(
        "Open the Doors",
        Side::LawEnforcement,
        ActionCategory::Negotiation,
        1,
        0.95,
    )
    .consequence(Consequence::release(8))]);
    let mut encounter = fixed_encounter(0.10).with_catalog(catalog);

    let resolution = encounter.perform_action("Open the Doors").unwrap();
    assert!(resolution.is_resolved());
    assert_eq!(encounter.state().hostage_count(HostageStatus::Released), 8);
    assert_eq!(encounter.state().action_points, 2);

    let status = encounter.game_over_status();
    assert!(status.game_over);
    assert!(status.victory);
    assert_eq!(status.victory_kind, Some(VictoryKind::AllHostagesReleased));
    assert_eq!(encounter.phase(), Phase::GameOver);

    let after = encounter.perform_action("Open the Doors").unwrap();
    assert_eq!(after.rejection(), Some(&Rejection::EncounterOver));
}

#[test]
fn test_random_play_terminates_within_max_turns() {
    for faction in [Faction::Fbi, Faction::Cia, Faction::LocalPd] {
        for seed in 0..15u64 {
            let mut encounter = new_encounter(faction, seed).unwrap();
            let mut policy = SmallRng::seed_from_u64(seed ^ 0xfeed);
            let mut end_turns = 0;

            while encounter.phase() != Phase::GameOver {
                let names: Vec<String> = encounter
                    .available_actions()
                    .into_values()
                    .flatten()
                    .map(|a| a.name.clone())
                    .collect();
                // End the turn early now and then
                if names.is_empty() || policy.gen::<f32>() < 0.2 {
                    let report = encounter.end_player_turn().unwrap();
                    end_turns += 1;
                    assert!(report
                        .adversary_actions
                        .iter()
                        .all(|r| r.actor == Side::HostageTaker));
                } else {
                    let pick = policy.gen_range(0..names.len());
                    let before = encounter.state().action_points;
                    let resolution = encounter.perform_action(&names[pick]).unwrap();
                    let result = resolution.result().expect("listed actions validate");
                    assert_eq!(encounter.state().action_points, before - result.ap_charged);
                }
                assert_bounded(encounter.state());
                assert!(end_turns <= 15, "{faction} seed {seed} ran past the turn limit");
            }

            let status = encounter.game_over_status();
            assert!(status.game_over);
            assert_ne!(status.victory, status.defeat_reason.is_some());
        }
    }
}

#[test]
fn test_end_turn_refreshes_and_reports() {
    let mut encounter = new_encounter(Faction::Fbi, 3).unwrap();
    encounter.perform_action("Empathize").unwrap();
    let report = encounter.end_player_turn().unwrap();

    if encounter.phase() == Phase::PlayerTurn {
        assert_eq!(report.new_turn, 2);
        assert_eq!(encounter.state().action_points, 3);
        assert_eq!(encounter.state().adversary_action_points, 3);
        assert!(encounter.state().used_special_abilities.is_empty());
    }
    let player_count = encounter
        .opponent()
        .player_histogram()
        .values()
        .sum::<u32>();
    assert_eq!(player_count, 1);
}
