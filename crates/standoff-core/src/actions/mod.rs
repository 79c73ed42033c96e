//! Action Definitions
//!
//! Immutable descriptions of everything either side can attempt: cost, base
//! chance, requirements, and the consequences a success (or a botch) brings.
//! The per-side catalogs live in `law_enforcement` and `hostage_taker`.

pub mod catalog;
pub mod hostage_taker;
pub mod law_enforcement;
pub mod profile;

use serde::{Deserialize, Serialize};

use standoff_events::{ActionCategory, Faction, OutcomeClass, Side};

use crate::components::{
    Condition, Demand, HostageStatus, Metric, Resource, Role, Severity, SituationState,
    TacticalPosition,
};

pub use catalog::Catalog;
pub use profile::{category_profile, CategoryProfile, MetricShift};

/// A metric named relative to the acting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricTarget {
    Trust,
    Tension,
    OwnMorale,
    OpposingMorale,
    PublicOpinion,
}

impl MetricTarget {
    /// Resolve to an absolute metric for the acting side.
    pub fn for_actor(self, actor: Side) -> Metric {
        match self {
            MetricTarget::Trust => Metric::Trust,
            MetricTarget::Tension => Metric::Tension,
            MetricTarget::OwnMorale => Metric::morale_of(actor),
            MetricTarget::OpposingMorale => Metric::morale_of(actor.opposing()),
            MetricTarget::PublicOpinion => Metric::PublicOpinion,
        }
    }
}

/// What happens to the selected hostages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostageEffect {
    Release,
    Wound,
    Kill,
}

impl HostageEffect {
    pub fn target_status(self) -> HostageStatus {
        match self {
            HostageEffect::Release => HostageStatus::Released,
            HostageEffect::Wound => HostageStatus::Wounded,
            HostageEffect::Kill => HostageStatus::Killed,
        }
    }
}

/// A single state change carried by an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsequenceKind {
    /// Acting side's own resource
    ResourceDelta { resource: Resource, amount: i32 },
    /// Acting side's own personnel
    PersonnelDelta { role: Role, amount: i32 },
    /// Hostage-taker resources, whoever acts
    AdversaryResourceDelta { resource: Resource, amount: i32 },
    /// Hostage-taker personnel, whoever acts
    AdversaryPersonnelDelta { role: Role, amount: i32 },
    HostageEffect {
        effect: HostageEffect,
        count: u32,
        required_status: HostageStatus,
    },
    EnvironmentalChange { condition: Condition, severity: Severity },
    TacticalPositionSet { position: TacticalPosition, secured: bool },
    /// Positive extends the deadline; negative never drops it below 1
    DeadlineShift { turns: i32 },
    PublicOpinionChange { delta: f32 },
    MetricShift { target: MetricTarget, delta: f32 },
    /// Extra player action points next turn
    BonusActionPoints { amount: u32 },
    DemandEscalation { demand: Demand, amount: u64 },
    DemandConcession { demand: Demand, amount: u64 },
}

/// When a consequence is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    #[default]
    OnSuccess,
    OnSuccessOrCriticalFailure,
    /// Backfires: only a critical failure sets these off
    OnCriticalFailure,
    /// Any failed attempt, critical or not
    OnFailure,
}

impl Trigger {
    pub fn fires_on(self, outcome: OutcomeClass) -> bool {
        match self {
            Trigger::OnSuccess => outcome.is_success(),
            Trigger::OnSuccessOrCriticalFailure => {
                outcome.is_success() || outcome == OutcomeClass::CriticalFailure
            }
            Trigger::OnCriticalFailure => outcome == OutcomeClass::CriticalFailure,
            Trigger::OnFailure => !outcome.is_success(),
        }
    }
}

/// A consequence with its firing chance and trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    pub kind: ConsequenceKind,
    /// Chance in [0, 1] that the consequence fires once triggered
    pub probability: f32,
    pub trigger: Trigger,
}

impl Consequence {
    pub fn new(kind: ConsequenceKind) -> Self {
        Self {
            kind,
            probability: 1.0,
            trigger: Trigger::OnSuccess,
        }
    }

    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    // Shorthand constructors used by the catalogs

    pub fn resource(resource: Resource, amount: i32) -> Self {
        Self::new(ConsequenceKind::ResourceDelta { resource, amount })
    }

    pub fn personnel(role: Role, amount: i32) -> Self {
        Self::new(ConsequenceKind::PersonnelDelta { role, amount })
    }

    pub fn adversary_resource(resource: Resource, amount: i32) -> Self {
        Self::new(ConsequenceKind::AdversaryResourceDelta { resource, amount })
    }

    pub fn adversary_personnel(role: Role, amount: i32) -> Self {
        Self::new(ConsequenceKind::AdversaryPersonnelDelta { role, amount })
    }

    pub fn release(count: u32) -> Self {
        Self::new(ConsequenceKind::HostageEffect {
            effect: HostageEffect::Release,
            count,
            required_status: HostageStatus::Captured,
        })
    }

    pub fn wound(count: u32) -> Self {
        Self::new(ConsequenceKind::HostageEffect {
            effect: HostageEffect::Wound,
            count,
            required_status: HostageStatus::Captured,
        })
    }

    pub fn kill(count: u32) -> Self {
        Self::new(ConsequenceKind::HostageEffect {
            effect: HostageEffect::Kill,
            count,
            required_status: HostageStatus::Captured,
        })
    }

    pub fn environment(condition: Condition, severity: Severity) -> Self {
        Self::new(ConsequenceKind::EnvironmentalChange { condition, severity })
    }

    pub fn secure(position: TacticalPosition) -> Self {
        Self::new(ConsequenceKind::TacticalPositionSet {
            position,
            secured: true,
        })
    }

    pub fn lose(position: TacticalPosition) -> Self {
        Self::new(ConsequenceKind::TacticalPositionSet {
            position,
            secured: false,
        })
    }

    pub fn deadline(turns: i32) -> Self {
        Self::new(ConsequenceKind::DeadlineShift { turns })
    }

    pub fn public_opinion(delta: f32) -> Self {
        Self::new(ConsequenceKind::PublicOpinionChange { delta })
    }

    pub fn metric(target: MetricTarget, delta: f32) -> Self {
        Self::new(ConsequenceKind::MetricShift { target, delta })
    }

    pub fn bonus_action_points(amount: u32) -> Self {
        Self::new(ConsequenceKind::BonusActionPoints { amount })
    }

    pub fn escalate(demand: Demand, amount: u64) -> Self {
        Self::new(ConsequenceKind::DemandEscalation { demand, amount })
    }

    pub fn concede(demand: Demand, amount: u64) -> Self {
        Self::new(ConsequenceKind::DemandConcession { demand, amount })
    }
}

/// A precondition beyond action points and cooldowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Acting side holds at least this much
    Resource { resource: Resource, min: u32 },
    /// Acting side fields at least this many
    Personnel { role: Role, min: u32 },
    PositionSecured { position: TacticalPosition },
    MinTrust { value: f32 },
    MinTension { value: f32 },
    HostageWithStatus { status: HostageStatus },
}

impl Requirement {
    pub fn is_met(&self, state: &SituationState, actor: Side) -> bool {
        match self {
            Requirement::Resource { resource, min } => state.resource(actor, *resource) >= *min,
            Requirement::Personnel { role, min } => state.personnel_count(actor, *role) >= *min,
            Requirement::PositionSecured { position } => state.is_secured(*position),
            Requirement::MinTrust { value } => state.metrics.trust >= *value,
            Requirement::MinTension { value } => state.metrics.tension >= *value,
            Requirement::HostageWithStatus { status } => state.hostage_count(*status) > 0,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Requirement::Resource { resource, min } => format!("needs {min} {resource}"),
            Requirement::Personnel { role, min } => format!("needs {min} {role}"),
            Requirement::PositionSecured { position } => format!("{position} must be secured"),
            Requirement::MinTrust { value } => format!("trust must be at least {value:.2}"),
            Requirement::MinTension { value } => format!("tension must be at least {value:.2}"),
            Requirement::HostageWithStatus { status } => format!("needs a {status} hostage"),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    pub side: Side,
    pub category: ActionCategory,
    pub description: String,
    pub action_point_cost: u32,
    /// Base chance of success in [0, 1]
    pub base_success_chance: f32,
    pub requirements: Vec<Requirement>,
    /// Factions allowed to use this; `None` means the whole side
    pub faction_restriction: Option<Vec<Faction>>,
    pub is_special: bool,
    /// 0 for common actions, 1..=3 for specials
    pub special_level: u8,
    /// Ends the adversary turn on success
    pub irrevocable: bool,
    pub consequences: Vec<Consequence>,
    pub dialogue_text: Option<String>,
}

impl ActionDefinition {
    pub fn new(
        name: impl Into<String>,
        side: Side,
        category: ActionCategory,
        action_point_cost: u32,
        base_success_chance: f32,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            category,
            description: String::new(),
            action_point_cost,
            base_success_chance: base_success_chance.clamp(0.0, 1.0),
            requirements: Vec::new(),
            faction_restriction: None,
            is_special: false,
            special_level: 0,
            irrevocable: false,
            consequences: Vec::new(),
            dialogue_text: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.push(consequence);
        self
    }

    /// Faction special ability of the given tier.
    pub fn special(mut self, faction: Faction, level: u8) -> Self {
        self.faction_restriction = Some(vec![faction]);
        self.is_special = true;
        self.special_level = level;
        self
    }

    pub fn irrevocable(mut self) -> Self {
        self.irrevocable = true;
        self
    }

    pub fn dialogue(mut self, text: impl Into<String>) -> Self {
        self.dialogue_text = Some(text.into());
        self
    }

    /// Whether a faction may use this at all.
    pub fn usable_by(&self, faction: Faction) -> bool {
        faction.side() == self.side
            && self
                .faction_restriction
                .as_ref()
                .map_or(true, |allowed| allowed.contains(&faction))
    }

    /// First requirement the state does not satisfy.
    pub fn unmet_requirement(&self, state: &SituationState, actor: Side) -> Option<&Requirement> {
        self.requirements.iter().find(|req| !req.is_met(state, actor))
    }
}
