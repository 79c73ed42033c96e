//! Turn Scheduler
//!
//! Owns one encounter: the situation, the catalog, the opponent, and the single
//! random source every roll is drawn from. Front ends drive it through
//! `available_actions`, `perform_action`, and `end_player_turn`, and read it
//! back through `state`, `objectives`, and `game_over_status`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info};

use standoff_events::{ActionCategory, ActionResult, Faction, GameOverStatus, HistoryEntry, Objective};

use crate::actions::{ActionDefinition, Catalog};
use crate::components::SituationState;
use crate::config::EncounterConfig;
use crate::error::{EngineError, Rejection};
use crate::setup::{initial_state, Scenario};
use crate::systems::{
    end_turn_processing, objectives, resolve, validate, AdaptiveOpponent, Resolution,
};

/// Where the encounter is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    PlayerTurn,
    AdversaryTurn,
    EndTurnProcessing,
    GameOver,
}

/// What happened between the player ending their turn and getting the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub adversary_actions: Vec<ActionResult>,
    pub new_turn: u32,
    /// Drift and deterioration events from end-of-turn upkeep
    pub developments: Vec<String>,
}

/// A single encounter from setup to game over.
pub struct Encounter<R: Rng> {
    state: SituationState,
    catalog: Catalog,
    config: EncounterConfig,
    opponent: AdaptiveOpponent,
    rng: R,
    phase: Phase,
}

impl<R: Rng> Encounter<R> {
    /// Run setup and hand the first turn to the player.
    pub fn new(
        player_faction: Faction,
        scenario: &Scenario,
        config: EncounterConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let state = initial_state(player_faction, scenario, &config.rules)?;
        let opponent = AdaptiveOpponent::new(state.adversary_faction, config.adaptation.clone());

        info!(
            player = %player_faction,
            adversary = %state.adversary_faction,
            archetype = %opponent.archetype(),
            "Encounter started"
        );

        let mut encounter = Self {
            state,
            catalog: Catalog::standard(),
            config,
            opponent,
            rng,
            phase: Phase::Setup,
        };
        encounter.phase = encounter.settled_phase(Phase::PlayerTurn);
        Ok(encounter)
    }

    /// Replace the standard catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn state(&self) -> &SituationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn opponent(&self) -> &AdaptiveOpponent {
        &self.opponent
    }

    pub fn history(&self) -> &VecDeque<HistoryEntry> {
        self.state.history()
    }

    /// Player actions that would pass validation right now, by category.
    pub fn available_actions(&self) -> BTreeMap<ActionCategory, Vec<&ActionDefinition>> {
        let player = self.state.player_faction;
        let mut grouped = self.catalog.by_category(player);
        for actions in grouped.values_mut() {
            actions.retain(|action| validate(action, player, &self.state).is_ok());
        }
        grouped.retain(|_, actions| !actions.is_empty());
        grouped
    }

    /// Attempt a player action by name.
    ///
    /// An unknown name is an `Err`; anything the rules refuse comes back as
    /// `Resolution::Rejected` with the state untouched.
    ///
    /// The phase stays `PlayerTurn` when the last action point is spent.
    /// Check [`Encounter::player_turn_exhausted`] and call
    /// [`Encounter::end_player_turn`] to hand over.
    pub fn perform_action(&mut self, name: &str) -> Result<Resolution, EngineError> {
        let action = self.catalog.require(name)?;
        if self.phase != Phase::PlayerTurn {
            return Ok(Resolution::Rejected(Rejection::EncounterOver));
        }

        let resolution = resolve(
            action,
            self.state.player_faction,
            &mut self.state,
            &self.config.rules,
            &mut self.rng,
        );
        self.phase = self.settled_phase(Phase::PlayerTurn);
        Ok(resolution)
    }

    /// True once the player has no action points left this turn.
    pub fn player_turn_exhausted(&self) -> bool {
        self.phase == Phase::PlayerTurn && self.state.action_points == 0
    }

    /// Hand over to the adversary, then run end-of-turn upkeep.
    pub fn end_player_turn(&mut self) -> Result<TurnReport, Rejection> {
        if self.phase != Phase::PlayerTurn {
            return Err(Rejection::EncounterOver);
        }

        self.phase = Phase::AdversaryTurn;
        let adversary_actions = self.opponent.take_turn(
            &mut self.state,
            &self.catalog,
            &self.config.rules,
            &mut self.rng,
        );
        debug!(count = adversary_actions.len(), "Adversary turn finished");

        let mut developments = Vec::new();
        if !self.state.is_game_over() {
            self.phase = Phase::EndTurnProcessing;
            developments = end_turn_processing(&mut self.state, &self.config, &mut self.rng);
        }
        self.phase = self.settled_phase(Phase::PlayerTurn);

        Ok(TurnReport {
            adversary_actions,
            new_turn: self.state.turn,
            developments,
        })
    }

    pub fn objectives(&self) -> Vec<Objective> {
        objectives(&self.state)
    }

    pub fn game_over_status(&self) -> GameOverStatus {
        self.state.outcome().into()
    }

    fn settled_phase(&self, otherwise: Phase) -> Phase {
        if self.state.is_game_over() {
            Phase::GameOver
        } else {
            otherwise
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use standoff_events::Side;

    fn encounter(seed: u64) -> Encounter<SmallRng> {
        Encounter::new(
            Faction::Fbi,
            &Scenario::default(),
            EncounterConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_on_player_turn() {
        let encounter = encounter(1);
        assert_eq!(encounter.phase(), Phase::PlayerTurn);
        assert!(!encounter.game_over_status().game_over);
        assert_eq!(encounter.opponent().faction, Faction::RedDragonTriad);
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let mut encounter = encounter(1);
        let err = encounter.perform_action("Summon Dragon").unwrap_err();
        assert!(matches!(err, EngineError::UnknownAction(name) if name == "Summon Dragon"));
        assert_eq!(encounter.state().action_points, 3);
    }

    #[test]
    fn test_available_actions_only_lists_player_options() {
        let encounter = encounter(1);
        let available = encounter.available_actions();
        assert!(!available.is_empty());
        for actions in available.values() {
            for action in actions {
                assert_eq!(action.side, Side::LawEnforcement);
                assert!(action.action_point_cost <= 3);
            }
        }
        let names: Vec<_> = available.values().flatten().map(|a| a.name.as_str()).collect();
        assert!(names.contains(&"Open Communication"));
        assert!(!names.contains(&"Covert Intelligence"));
        assert!(!names.contains(&"Breach and Clear"));
    }

    #[test]
    fn test_end_turn_advances() {
        let mut encounter = encounter(4);
        let report = encounter.end_player_turn().unwrap();
        if encounter.phase() == Phase::PlayerTurn {
            assert_eq!(report.new_turn, 2);
            assert_eq!(encounter.state().turn, 2);
            assert_eq!(encounter.state().action_points, 3);
        } else {
            assert_eq!(encounter.phase(), Phase::GameOver);
        }
        assert!(report
            .adversary_actions
            .iter()
            .all(|r| r.faction == Faction::RedDragonTriad));
    }

    #[test]
    fn test_game_over_refuses_everything() {
        let mut encounter = encounter(9);
        for _ in 0..40 {
            if encounter.end_player_turn().is_err() {
                break;
            }
        }
        assert_eq!(encounter.phase(), Phase::GameOver);
        assert!(encounter.game_over_status().game_over);
        assert_eq!(
            encounter.end_player_turn().unwrap_err(),
            Rejection::EncounterOver
        );
        let resolution = encounter.perform_action("Empathize").unwrap();
        assert_eq!(resolution.rejection(), Some(&Rejection::EncounterOver));
    }
}
