//! Adaptive Opponent
//!
//! The hostage takers' decision maker. Each adversary phase it re-reads the
//! situation to pick a behavior archetype, scores every valid action, samples
//! without replacement until it runs out of points or options, and finally
//! learns from what the player did this turn.

pub mod select;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

use standoff_events::{ActionCategory, ActionResult, Faction, Side};

use crate::actions::Catalog;
use crate::components::SituationState;
use crate::config::{AdaptationConfig, RulesConfig};

use super::resolution::{resolve, validate, Resolution};

pub use select::{action_weight, is_lethal, weighted_choice, WeightedAction};

/// Thresholds that override the learned archetype.
pub mod archetype_thresholds {
    /// Adversary morale below this makes them desperate
    pub const DESPERATE_MORALE: f32 = 0.3;
    /// Tension above this makes them erratic
    pub const ERRATIC_TENSION: f32 = 0.8;
}

/// Behavior archetype driving action weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Aggressive,
    Defensive,
    Calculating,
    Erratic,
    Desperate,
}

impl Archetype {
    /// Starting temperament of a hostage-taker faction.
    pub fn initial_for(faction: Faction) -> Archetype {
        match faction {
            Faction::ShadowSyndicate => Archetype::Calculating,
            Faction::RedDragonTriad => Archetype::Aggressive,
            Faction::LiberationFront => Archetype::Erratic,
            Faction::Fbi | Faction::Cia | Faction::LocalPd => Archetype::Calculating,
        }
    }

    /// Counter-style adopted against a player who leans on `category`.
    pub fn countering(category: ActionCategory) -> Option<Archetype> {
        match category {
            ActionCategory::Force => Some(Archetype::Defensive),
            ActionCategory::Negotiation => Some(Archetype::Calculating),
            ActionCategory::Tech => Some(Archetype::Erratic),
            _ => None,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Archetype::Aggressive => write!(f, "aggressive"),
            Archetype::Defensive => write!(f, "defensive"),
            Archetype::Calculating => write!(f, "calculating"),
            Archetype::Erratic => write!(f, "erratic"),
            Archetype::Desperate => write!(f, "desperate"),
        }
    }
}

/// The hostage takers' controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveOpponent {
    pub faction: Faction,
    archetype: Archetype,
    /// Player action counts by category
    player_histogram: BTreeMap<ActionCategory, u32>,
    /// How well the opponent has read the player, in [0, 1]
    adaptation_level: f32,
    adaptation: AdaptationConfig,
}

impl AdaptiveOpponent {
    pub fn new(faction: Faction, adaptation: AdaptationConfig) -> Self {
        Self {
            faction,
            archetype: Archetype::initial_for(faction),
            player_histogram: BTreeMap::new(),
            adaptation_level: 0.0,
            adaptation,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn adaptation_level(&self) -> f32 {
        self.adaptation_level
    }

    pub fn player_histogram(&self) -> &BTreeMap<ActionCategory, u32> {
        &self.player_histogram
    }

    /// Player's most used category; ties go to the earliest category.
    pub fn most_frequent_player_category(&self) -> Option<ActionCategory> {
        let mut best: Option<(ActionCategory, u32)> = None;
        for (&category, &count) in &self.player_histogram {
            if count == 0 {
                continue;
            }
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }

    /// Re-derive the archetype from the histogram and the situation.
    pub fn adapt(&mut self, state: &SituationState) {
        use archetype_thresholds::*;

        let before = self.archetype;
        if self.adaptation_level >= self.adaptation.threshold {
            if let Some(counter) = self
                .most_frequent_player_category()
                .and_then(Archetype::countering)
            {
                self.archetype = counter;
            }
        }

        if state.metrics.adversary_morale < DESPERATE_MORALE {
            self.archetype = Archetype::Desperate;
        } else if state.metrics.tension > ERRATIC_TENSION {
            self.archetype = Archetype::Erratic;
        }

        if before != self.archetype {
            info!(from = %before, to = %self.archetype, "Opponent changed behavior");
        }
    }

    /// Record the player's actions from the current turn.
    pub fn observe_player_turn(&mut self, state: &SituationState) {
        let observed: Vec<ActionCategory> = state
            .history()
            .iter()
            .filter(|entry| entry.actor == Side::LawEnforcement && entry.turn == state.turn)
            .map(|entry| entry.category)
            .collect();
        for category in observed {
            *self.player_histogram.entry(category).or_insert(0) += 1;
            self.adaptation_level = (self.adaptation_level + self.adaptation.step).min(1.0);
        }
    }

    /// Play the adversary phase. Returns every resolved action in order.
    pub fn take_turn<R: Rng + ?Sized>(
        &mut self,
        state: &mut SituationState,
        catalog: &Catalog,
        rules: &RulesConfig,
        rng: &mut R,
    ) -> Vec<ActionResult> {
        self.adapt(state);
        debug!(
            archetype = %self.archetype,
            adaptation = self.adaptation_level,
            points = state.adversary_action_points,
            "Opponent turn started"
        );

        let mut attempted: BTreeSet<String> = BTreeSet::new();
        let mut results = Vec::new();

        while !state.is_game_over() && state.adversary_action_points > 0 {
            let mut candidates = Vec::new();
            for action in catalog.for_faction(self.faction) {
                if attempted.contains(&action.name) || validate(action, self.faction, state).is_err()
                {
                    continue;
                }
                let weight = action_weight(action, self.archetype, state, rng);
                candidates.push(WeightedAction { action, weight });
            }

            let Some(chosen) = weighted_choice(rng, &candidates) else {
                break;
            };
            let action = chosen.action;
            attempted.insert(action.name.clone());

            if let Resolution::Resolved(result) = resolve(action, self.faction, state, rules, rng) {
                let ends_turn = action.irrevocable && result.succeeded();
                debug!(action = %result.action, outcome = %result.outcome, "Opponent acted");
                results.push(result);
                if ends_turn {
                    info!(action = %action.name, "Opponent ended its turn early");
                    break;
                }
            }
        }

        self.observe_player_turn(state);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionDefinition, Consequence};
    use crate::components::{Hostage, HostageStatus, Resource, Role};
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use standoff_events::OutcomeClass;

    /// Mock source whose every `gen::<f32>()` yields `value`.
    fn fixed_roll(value: f32) -> StepRng {
        let bits = ((value * (1u32 << 24) as f32) as u32) << 8;
        StepRng::new(bits as u64, 0)
    }

    fn player_entry(turn: u32, category: ActionCategory) -> ActionResult {
        ActionResult {
            turn,
            actor: Side::LawEnforcement,
            faction: Faction::Fbi,
            action: "Sound Out".to_string(),
            category,
            outcome: OutcomeClass::Success,
            roll: 0.2,
            effective_chance: 0.8,
            ap_charged: 1,
            descriptions: Vec::new(),
            dialogue_text: None,
        }
    }

    fn adversary_state() -> SituationState {
        let mut state = SituationState::new(Faction::Fbi, Faction::RedDragonTriad, 100);
        state.action_points = 3;
        state.adversary_action_points = 3;
        state.hostages = (1..=8).map(|id| Hostage::new(id, format!("H{id}"))).collect();
        state.adversary_resources.insert(Resource::Manpower, 4);
        state.adversary_resources.insert(Resource::Equipment, 2);
        state.adversary_resources.insert(Resource::Intelligence, 2);
        state.adversary_personnel.insert(Role::ArmedMember, 4);
        state.adversary_personnel.insert(Role::Lookout, 2);
        state
    }

    #[test]
    fn test_initial_archetypes() {
        assert_eq!(
            Archetype::initial_for(Faction::ShadowSyndicate),
            Archetype::Calculating
        );
        assert_eq!(
            Archetype::initial_for(Faction::RedDragonTriad),
            Archetype::Aggressive
        );
        assert_eq!(
            Archetype::initial_for(Faction::LiberationFront),
            Archetype::Erratic
        );
    }

    #[test]
    fn test_adapts_to_force_heavy_player() {
        let mut state = adversary_state();
        let mut opponent = AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());
        for _ in 0..5 {
            state.push_history(player_entry(1, ActionCategory::Force));
        }
        opponent.observe_player_turn(&state);
        assert!((opponent.adaptation_level() - 0.5).abs() < 1e-5);
        assert_eq!(opponent.player_histogram().get(&ActionCategory::Force), Some(&5));

        opponent.adapt(&state);
        assert_eq!(opponent.archetype(), Archetype::Defensive);
    }

    #[test]
    fn test_state_overrides_win() {
        let mut state = adversary_state();
        let mut opponent = AdaptiveOpponent::new(Faction::ShadowSyndicate, AdaptationConfig::default());
        state.metrics.tension = 0.9;
        opponent.adapt(&state);
        assert_eq!(opponent.archetype(), Archetype::Erratic);

        state.metrics.adversary_morale = 0.2;
        opponent.adapt(&state);
        assert_eq!(opponent.archetype(), Archetype::Desperate);
    }

    #[test]
    fn test_histogram_tie_goes_to_first_category() {
        let mut state = adversary_state();
        let mut opponent = AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());
        state.push_history(player_entry(1, ActionCategory::Tech));
        state.push_history(player_entry(1, ActionCategory::Negotiation));
        opponent.observe_player_turn(&state);
        assert_eq!(
            opponent.most_frequent_player_category(),
            Some(ActionCategory::Negotiation)
        );
    }

    #[test]
    fn test_adaptation_caps_at_one() {
        let mut state = adversary_state();
        let mut opponent = AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());
        for _ in 0..30 {
            state.push_history(player_entry(1, ActionCategory::Dialogue));
        }
        opponent.observe_player_turn(&state);
        assert_eq!(opponent.adaptation_level(), 1.0);
    }

    #[test]
    fn test_take_turn_spends_points_without_repeats() {
        let catalog = Catalog::standard();
        let rules = RulesConfig::default();
        for seed in 0..25 {
            let mut state = adversary_state();
            let mut opponent =
                AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());
            let mut rng = SmallRng::seed_from_u64(seed);
            let results = opponent.take_turn(&mut state, &catalog, &rules, &mut rng);

            assert!(!results.is_empty(), "seed {seed}");
            let spent: u32 = results.iter().map(|r| r.ap_charged).sum();
            assert!(spent <= 3);
            assert_eq!(state.adversary_action_points, 3 - spent);
            let names: BTreeSet<_> = results.iter().map(|r| r.action.as_str()).collect();
            assert_eq!(names.len(), results.len());
            assert!(results.iter().all(|r| r.actor == Side::HostageTaker));
            assert_eq!(state.action_points, 3);
        }
    }

    #[test]
    fn test_irrevocable_success_ends_turn_early() {
        let catalog = Catalog::new(vec![
            ActionDefinition::new("Make an Example", Side::HostageTaker, ActionCategory::Threats, 1, 0.9)
                .irrevocable()
                .consequence(Consequence::kill(1)),
            ActionDefinition::new("Raise Voices", Side::HostageTaker, ActionCategory::Threats, 1, 0.9),
        ]);
        let mut state = adversary_state();
        state.killed_tolerance = 3;
        let mut opponent = AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());
        let mut rng = fixed_roll(0.1);

        let results = opponent.take_turn(&mut state, &catalog, &RulesConfig::default(), &mut rng);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].action, "Make an Example");
        assert!(results[0].succeeded());
        assert_eq!(state.adversary_action_points, 2);
        assert_eq!(state.hostage_count(HostageStatus::Killed), 1);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_revocable_actions_keep_spending() {
        let catalog = Catalog::new(vec![
            ActionDefinition::new("Raise Voices", Side::HostageTaker, ActionCategory::Threats, 1, 0.9),
            ActionDefinition::new("Bang on Doors", Side::HostageTaker, ActionCategory::Threats, 1, 0.9),
        ]);
        let mut state = adversary_state();
        let mut opponent = AdaptiveOpponent::new(Faction::RedDragonTriad, AdaptationConfig::default());

        let results =
            opponent.take_turn(&mut state, &catalog, &RulesConfig::default(), &mut fixed_roll(0.1));

        assert_eq!(results.len(), 2);
        assert_eq!(state.adversary_action_points, 1);
    }
}
