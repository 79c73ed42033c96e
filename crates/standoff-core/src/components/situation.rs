//! Situation State
//!
//! The single mutable snapshot of an encounter. Resolution, consequences,
//! end-of-turn upkeep, and the opponent all mutate it through `&mut`; front
//! ends only ever see `&SituationState`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use standoff_events::{
    DefeatReason, EncounterOutcome, Faction, HistoryEntry, Side, VictoryKind,
};

use super::hostage::{Hostage, HostageStatus};
use super::world::{Condition, Demand, Resource, Role, Severity, TacticalPosition};

/// A scalar situation metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Trust,
    Tension,
    /// Law-enforcement morale
    Morale,
    AdversaryMorale,
    PublicOpinion,
}

impl Metric {
    /// The morale metric belonging to a side.
    pub fn morale_of(side: Side) -> Metric {
        match side {
            Side::LawEnforcement => Metric::Morale,
            Side::HostageTaker => Metric::AdversaryMorale,
        }
    }
}

/// Situation metrics. All values stay within [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub trust: f32,
    pub tension: f32,
    pub morale: f32,
    pub adversary_morale: f32,
    pub public_opinion: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            trust: 0.5,
            tension: 0.5,
            morale: 0.75,
            adversary_morale: 0.7,
            public_opinion: 0.5,
        }
    }
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Trust => self.trust,
            Metric::Tension => self.tension,
            Metric::Morale => self.morale,
            Metric::AdversaryMorale => self.adversary_morale,
            Metric::PublicOpinion => self.public_opinion,
        }
    }

    /// Add `delta` and clamp to [0, 1]. Returns the applied change.
    pub fn shift(&mut self, metric: Metric, delta: f32) -> f32 {
        let slot = match metric {
            Metric::Trust => &mut self.trust,
            Metric::Tension => &mut self.tension,
            Metric::Morale => &mut self.morale,
            Metric::AdversaryMorale => &mut self.adversary_morale,
            Metric::PublicOpinion => &mut self.public_opinion,
        };
        let before = *slot;
        *slot = (before + delta).clamp(0.0, 1.0);
        *slot - before
    }

    pub fn morale_of(&self, side: Side) -> f32 {
        self.get(Metric::morale_of(side))
    }
}

/// Complete encounter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationState {
    /// Current turn, starting at 1
    pub turn: u32,
    pub max_turns: u32,
    pub player_faction: Faction,
    pub adversary_faction: Faction,

    /// Player action points remaining this turn
    pub action_points: u32,
    /// Adversary action points remaining this turn
    pub adversary_action_points: u32,
    /// Extra player action points granted for the next turn
    pub bonus_action_points: u32,

    pub metrics: Metrics,

    pub player_resources: BTreeMap<Resource, u32>,
    pub adversary_resources: BTreeMap<Resource, u32>,
    pub player_personnel: BTreeMap<Role, u32>,
    pub adversary_personnel: BTreeMap<Role, u32>,

    pub hostages: Vec<Hostage>,
    /// Killed hostages tolerated before defeat
    pub killed_tolerance: u32,

    /// Secured (true) or not
    pub tactical_positions: BTreeMap<TacticalPosition, bool>,
    pub environment: BTreeMap<Condition, Severity>,

    /// What the hostage takers are asking for
    pub demands: BTreeMap<Demand, u64>,
    /// How much of each demand has been met
    pub demands_met: BTreeMap<Demand, u64>,
    /// Turns left to meet the ransom; may go negative
    pub hostage_deadline: i32,

    /// Action name to turns remaining
    pub cooldowns: BTreeMap<String, u32>,
    /// Special abilities used this turn
    pub used_special_abilities: BTreeSet<String>,

    history: VecDeque<HistoryEntry>,
    history_limit: usize,
    outcome: Option<EncounterOutcome>,
}

impl SituationState {
    /// Empty state for the given pairing. Setup fills in the scenario.
    pub fn new(player_faction: Faction, adversary_faction: Faction, history_limit: usize) -> Self {
        Self {
            turn: 1,
            max_turns: 15,
            player_faction,
            adversary_faction,
            action_points: 0,
            adversary_action_points: 0,
            bonus_action_points: 0,
            metrics: Metrics::default(),
            player_resources: BTreeMap::new(),
            adversary_resources: BTreeMap::new(),
            player_personnel: BTreeMap::new(),
            adversary_personnel: BTreeMap::new(),
            hostages: Vec::new(),
            killed_tolerance: 0,
            tactical_positions: BTreeMap::new(),
            environment: BTreeMap::new(),
            demands: BTreeMap::new(),
            demands_met: BTreeMap::new(),
            hostage_deadline: 10,
            cooldowns: BTreeMap::new(),
            used_special_abilities: BTreeSet::new(),
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
            outcome: None,
        }
    }

    // --- Action points ---

    pub fn action_points_of(&self, side: Side) -> u32 {
        match side {
            Side::LawEnforcement => self.action_points,
            Side::HostageTaker => self.adversary_action_points,
        }
    }

    pub fn action_points_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::LawEnforcement => &mut self.action_points,
            Side::HostageTaker => &mut self.adversary_action_points,
        }
    }

    // --- Resources and personnel ---

    pub fn resources(&self, side: Side) -> &BTreeMap<Resource, u32> {
        match side {
            Side::LawEnforcement => &self.player_resources,
            Side::HostageTaker => &self.adversary_resources,
        }
    }

    pub fn resource(&self, side: Side, resource: Resource) -> u32 {
        self.resources(side).get(&resource).copied().unwrap_or(0)
    }

    /// Apply a signed change, flooring at zero. Returns the new amount.
    pub fn modify_resource(&mut self, side: Side, resource: Resource, delta: i32) -> u32 {
        let map = match side {
            Side::LawEnforcement => &mut self.player_resources,
            Side::HostageTaker => &mut self.adversary_resources,
        };
        let entry = map.entry(resource).or_insert(0);
        *entry = apply_signed(*entry, delta);
        *entry
    }

    pub fn personnel(&self, side: Side) -> &BTreeMap<Role, u32> {
        match side {
            Side::LawEnforcement => &self.player_personnel,
            Side::HostageTaker => &self.adversary_personnel,
        }
    }

    pub fn personnel_count(&self, side: Side, role: Role) -> u32 {
        self.personnel(side).get(&role).copied().unwrap_or(0)
    }

    pub fn total_personnel(&self, side: Side) -> u32 {
        self.personnel(side).values().sum()
    }

    /// Apply a signed change, flooring at zero. Returns the new count.
    pub fn modify_personnel(&mut self, side: Side, role: Role, delta: i32) -> u32 {
        let map = match side {
            Side::LawEnforcement => &mut self.player_personnel,
            Side::HostageTaker => &mut self.adversary_personnel,
        };
        let entry = map.entry(role).or_insert(0);
        *entry = apply_signed(*entry, delta);
        *entry
    }

    // --- Hostages ---

    pub fn hostage_count(&self, status: HostageStatus) -> usize {
        self.hostages.iter().filter(|h| h.status() == status).count()
    }

    pub fn total_hostages(&self) -> usize {
        self.hostages.len()
    }

    // --- Site ---

    pub fn is_secured(&self, position: TacticalPosition) -> bool {
        self.tactical_positions.get(&position).copied().unwrap_or(false)
    }

    pub fn severity(&self, condition: Condition) -> Severity {
        self.environment.get(&condition).copied().unwrap_or_default()
    }

    /// True while some part of the ransom is still outstanding.
    pub fn ransom_outstanding(&self) -> bool {
        let requested = self.demands.get(&Demand::Money).copied().unwrap_or(0);
        let met = self.demands_met.get(&Demand::Money).copied().unwrap_or(0);
        met < requested
    }

    // --- Cooldowns and specials ---

    pub fn cooldown_remaining(&self, action: &str) -> u32 {
        self.cooldowns.get(action).copied().unwrap_or(0)
    }

    /// Decrement every cooldown, dropping the ones that reach zero.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    // --- History ---

    pub fn history(&self) -> &VecDeque<HistoryEntry> {
        &self.history
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Append, evicting the oldest entry once the limit is reached.
    pub fn push_history(&mut self, entry: HistoryEntry) {
        if self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(entry);
    }

    /// Most recent entry by the given side.
    pub fn last_action_by(&self, side: Side) -> Option<&HistoryEntry> {
        self.history.iter().rev().find(|entry| entry.actor == side)
    }

    // --- Outcome ---

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_victory(&self) -> bool {
        self.outcome.is_some_and(EncounterOutcome::is_victory)
    }

    pub fn victory_kind(&self) -> Option<VictoryKind> {
        match self.outcome {
            Some(EncounterOutcome::Victory(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn defeat_reason(&self) -> Option<DefeatReason> {
        match self.outcome {
            Some(EncounterOutcome::Defeat(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Record the outcome. The first one recorded is final.
    pub(crate) fn latch_outcome(&mut self, outcome: EncounterOutcome) -> EncounterOutcome {
        *self.outcome.get_or_insert(outcome)
    }
}

fn apply_signed(current: u32, delta: i32) -> u32 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}
