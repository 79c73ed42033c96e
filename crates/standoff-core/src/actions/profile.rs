//! Category Profiles
//!
//! One behavior record per action category: the baseline metric shift a
//! success applies for each side, which chance modifiers apply, and how the
//! opponent archetypes weigh the category.

use standoff_events::{ActionCategory, Side};

/// Baseline metric shift applied on success, relative to the acting side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricShift {
    pub trust: f32,
    pub tension: f32,
    pub own_morale: f32,
    pub opposing_morale: f32,
}

impl MetricShift {
    pub const NONE: MetricShift = MetricShift::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(trust: f32, tension: f32, own_morale: f32, opposing_morale: f32) -> Self {
        Self {
            trust,
            tension,
            own_morale,
            opposing_morale,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            trust: self.trust * factor,
            tension: self.tension * factor,
            own_morale: self.own_morale * factor,
            opposing_morale: self.opposing_morale * factor,
        }
    }
}

/// Weight multipliers the fixed archetypes apply to a category.
/// The erratic archetype draws its multiplier at random instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeWeights {
    pub aggressive: f32,
    pub defensive: f32,
    pub calculating: f32,
    pub desperate: f32,
}

impl ArchetypeWeights {
    pub const NEUTRAL: ArchetypeWeights = ArchetypeWeights::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(aggressive: f32, defensive: f32, calculating: f32, desperate: f32) -> Self {
        Self {
            aggressive,
            defensive,
            calculating,
            desperate,
        }
    }
}

/// Weight multipliers keyed on the current situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SituationWeights {
    /// Adversary morale below the low-morale line
    pub low_morale: f32,
    /// Tension above the high-tension line
    pub high_tension: f32,
    /// Trust below the low-trust line
    pub low_trust: f32,
}

impl SituationWeights {
    pub const NEUTRAL: SituationWeights = SituationWeights::new(1.0, 1.0, 1.0);

    pub const fn new(low_morale: f32, high_tension: f32, low_trust: f32) -> Self {
        Self {
            low_morale,
            high_tension,
            low_trust,
        }
    }
}

/// Behavior record for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Success shift when law enforcement acts
    pub player_success: MetricShift,
    /// Success shift when the hostage takers act
    pub adversary_success: MetricShift,
    /// Gains the high-trust bonus
    pub trust_bonus: bool,
    /// Suffers the high-tension penalty
    pub tension_penalty: bool,
    /// Harder while the power is out
    pub power_sensitive: bool,
    /// Harder while anything is burning
    pub fire_sensitive: bool,
    /// Harder right after a failed use of force
    pub undermined_by_failed_force: bool,
    pub archetype: ArchetypeWeights,
    pub situation: SituationWeights,
}

impl CategoryProfile {
    const fn base(player_success: MetricShift, adversary_success: MetricShift) -> Self {
        Self {
            player_success,
            adversary_success,
            trust_bonus: false,
            tension_penalty: false,
            power_sensitive: false,
            fire_sensitive: false,
            undermined_by_failed_force: false,
            archetype: ArchetypeWeights::NEUTRAL,
            situation: SituationWeights::NEUTRAL,
        }
    }

    pub fn success_shift(&self, side: Side) -> MetricShift {
        match side {
            Side::LawEnforcement => self.player_success,
            Side::HostageTaker => self.adversary_success,
        }
    }
}

/// Metric shifts applied on any failure.
pub mod failure_shift {
    /// Tension added by a failed action
    pub const TENSION: f32 = 0.15;
    /// Multiplier on the tension spike for critical failures
    pub const CRITICAL_MULTIPLIER: f32 = 2.0;
    /// Acting side's morale lost on failure
    pub const OWN_MORALE: f32 = -0.05;
}

const DIALOGUE: CategoryProfile = CategoryProfile::base(
    MetricShift::new(0.10, -0.05, 0.0, 0.0),
    MetricShift::new(0.05, -0.05, 0.05, 0.0),
);

const NEGOTIATION: CategoryProfile = CategoryProfile {
    trust_bonus: true,
    undermined_by_failed_force: true,
    archetype: ArchetypeWeights::new(0.5, 1.0, 2.0, 1.0),
    situation: SituationWeights::new(1.0, 0.5, 1.0),
    ..CategoryProfile::base(
        MetricShift::new(0.10, -0.05, 0.0, -0.05),
        MetricShift::new(-0.10, 0.0, 0.10, 0.0),
    )
};

const TACTICAL: CategoryProfile = CategoryProfile {
    trust_bonus: true,
    archetype: ArchetypeWeights::new(1.0, 2.0, 1.0, 1.0),
    ..CategoryProfile::base(
        MetricShift::new(0.0, -0.05, 0.05, 0.0),
        MetricShift::new(0.0, 0.0, 0.05, 0.0),
    )
};

const RESOURCES: CategoryProfile = CategoryProfile::base(
    MetricShift::new(0.0, 0.0, 0.05, 0.0),
    MetricShift::new(0.0, 0.0, 0.05, 0.0),
);

const FORCE: CategoryProfile = CategoryProfile {
    tension_penalty: true,
    fire_sensitive: true,
    archetype: ArchetypeWeights::new(2.0, 0.5, 0.7, 3.0),
    situation: SituationWeights::new(2.0, 1.0, 1.0),
    ..CategoryProfile::base(
        MetricShift::new(-0.10, 0.15, 0.0, -0.10),
        MetricShift::new(0.0, 0.15, 0.0, 0.0),
    )
};

const TECH: CategoryProfile = CategoryProfile {
    power_sensitive: true,
    ..CategoryProfile::base(
        MetricShift::new(0.0, 0.0, 0.05, -0.05),
        MetricShift::new(0.0, 0.0, 0.05, 0.0),
    )
};

const THREATS: CategoryProfile = CategoryProfile::base(
    MetricShift::new(-0.05, 0.10, 0.0, -0.05),
    MetricShift::new(-0.05, 0.10, 0.0, -0.10),
);

const DEMANDS: CategoryProfile = CategoryProfile {
    archetype: ArchetypeWeights::new(2.0, 1.0, 1.0, 1.0),
    ..CategoryProfile::base(
        MetricShift::new(0.0, 0.05, 0.0, 0.0),
        MetricShift::new(0.0, 0.10, 0.0, 0.0),
    )
};

const DECEPTION: CategoryProfile = CategoryProfile {
    archetype: ArchetypeWeights::new(1.0, 2.0, 1.0, 1.0),
    situation: SituationWeights::new(1.0, 1.0, 0.5),
    ..CategoryProfile::base(
        MetricShift::new(-0.10, 0.0, 0.0, 0.0),
        MetricShift::new(-0.15, 0.0, 0.0, 0.0),
    )
};

const PSYCHOLOGICAL: CategoryProfile = CategoryProfile {
    archetype: ArchetypeWeights::new(1.0, 1.0, 2.0, 1.0),
    ..CategoryProfile::base(
        MetricShift::new(0.0, 0.0, 0.0, -0.10),
        MetricShift::new(0.0, 0.0, 0.0, -0.20),
    )
};

/// Behavior record for a category.
pub fn category_profile(category: ActionCategory) -> &'static CategoryProfile {
    match category {
        ActionCategory::Dialogue => &DIALOGUE,
        ActionCategory::Negotiation => &NEGOTIATION,
        ActionCategory::Tactical => &TACTICAL,
        ActionCategory::Resources => &RESOURCES,
        ActionCategory::Force => &FORCE,
        ActionCategory::Tech => &TECH,
        ActionCategory::Threats => &THREATS,
        ActionCategory::Demands => &DEMANDS,
        ActionCategory::Deception => &DECEPTION,
        ActionCategory::Psychological => &PSYCHOLOGICAL,
    }
}
