//! Site Components
//!
//! Closed key sets for everything the situation tracks by name: resources,
//! personnel roles, tactical positions, environmental conditions, and demands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A closed set of named keys that can be parsed from config or CLI input.
pub trait SiteKey: Copy + Sized + 'static {
    /// Key family name used in error messages
    const KIND: &'static str;

    fn all() -> &'static [Self];

    fn key(self) -> &'static str;

    /// Parse a snake_case (or spaced / hyphenated) name.
    fn parse_key(name: &str) -> Result<Self, EngineError> {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");
        Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.key() == normalized)
            .ok_or_else(|| EngineError::UnknownResource {
                kind: Self::KIND,
                name: name.to_string(),
            })
    }
}

/// Consumable or countable assets held by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Manpower,
    Equipment,
    Intelligence,
    Medical,
    /// Budget in units of $100k
    Money,
    Concealment,
}

impl SiteKey for Resource {
    const KIND: &'static str = "resource";

    fn all() -> &'static [Self] {
        &[
            Resource::Manpower,
            Resource::Equipment,
            Resource::Intelligence,
            Resource::Medical,
            Resource::Money,
            Resource::Concealment,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Resource::Manpower => "manpower",
            Resource::Equipment => "equipment",
            Resource::Intelligence => "intelligence",
            Resource::Medical => "medical",
            Resource::Money => "money",
            Resource::Concealment => "concealment",
        }
    }
}

/// Personnel roles. Law enforcement and hostage takers use disjoint subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Negotiator,
    TacticalOfficer,
    Sniper,
    Medic,
    Analyst,
    ArmedMember,
    Lookout,
}

impl SiteKey for Role {
    const KIND: &'static str = "role";

    fn all() -> &'static [Self] {
        &[
            Role::Negotiator,
            Role::TacticalOfficer,
            Role::Sniper,
            Role::Medic,
            Role::Analyst,
            Role::ArmedMember,
            Role::Lookout,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Role::Negotiator => "negotiator",
            Role::TacticalOfficer => "tactical_officer",
            Role::Sniper => "sniper",
            Role::Medic => "medic",
            Role::Analyst => "analyst",
            Role::ArmedMember => "armed_member",
            Role::Lookout => "lookout",
        }
    }
}

/// Positions around (and inside) the site that can be secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalPosition {
    Perimeter,
    NegotiationPoint,
    CommandPost,
    SniperPositions,
    BreachPoints,
    Surveillance,
    Barricades,
    EscapeRoute,
}

impl SiteKey for TacticalPosition {
    const KIND: &'static str = "tactical position";

    fn all() -> &'static [Self] {
        &[
            TacticalPosition::Perimeter,
            TacticalPosition::NegotiationPoint,
            TacticalPosition::CommandPost,
            TacticalPosition::SniperPositions,
            TacticalPosition::BreachPoints,
            TacticalPosition::Surveillance,
            TacticalPosition::Barricades,
            TacticalPosition::EscapeRoute,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            TacticalPosition::Perimeter => "perimeter",
            TacticalPosition::NegotiationPoint => "negotiation_point",
            TacticalPosition::CommandPost => "command_post",
            TacticalPosition::SniperPositions => "sniper_positions",
            TacticalPosition::BreachPoints => "breach_points",
            TacticalPosition::Surveillance => "surveillance",
            TacticalPosition::Barricades => "barricades",
            TacticalPosition::EscapeRoute => "escape_route",
        }
    }
}

/// Environmental conditions of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Outage severity; `Clear` means power is fully on
    Power,
    Water,
    Fire,
    StructuralDamage,
}

impl SiteKey for Condition {
    const KIND: &'static str = "condition";

    fn all() -> &'static [Self] {
        &[
            Condition::Power,
            Condition::Water,
            Condition::Fire,
            Condition::StructuralDamage,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Condition::Power => "power",
            Condition::Water => "water",
            Condition::Fire => "fire",
            Condition::StructuralDamage => "structural_damage",
        }
    }
}

/// How bad a condition is. Ordered from harmless to worst.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Clear,
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub fn is_clear(self) -> bool {
        matches!(self, Severity::Clear)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Clear => write!(f, "clear"),
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Things the hostage takers ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demand {
    /// Ransom in dollars
    Money,
    /// Vehicles provided
    Transport,
    /// Prisoners released
    PrisonerRelease,
}

impl SiteKey for Demand {
    const KIND: &'static str = "demand";

    fn all() -> &'static [Self] {
        &[Demand::Money, Demand::Transport, Demand::PrisonerRelease]
    }

    fn key(self) -> &'static str {
        match self {
            Demand::Money => "money",
            Demand::Transport => "transport",
            Demand::PrisonerRelease => "prisoner_release",
        }
    }
}

macro_rules! display_and_parse_by_key {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.key().replace('_', " "))
                }
            }

            impl FromStr for $ty {
                type Err = EngineError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as SiteKey>::parse_key(s)
                }
            }
        )*
    };
}

display_and_parse_by_key!(Resource, Role, TacticalPosition, Condition, Demand);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("intelligence".parse::<Resource>().unwrap(), Resource::Intelligence);
        assert_eq!("Armed Member".parse::<Role>().unwrap(), Role::ArmedMember);
        assert_eq!(
            "breach-points".parse::<TacticalPosition>().unwrap(),
            TacticalPosition::BreachPoints
        );
        assert_eq!("fire".parse::<Condition>().unwrap(), Condition::Fire);
    }

    #[test]
    fn test_unknown_resource_is_reported() {
        let err = "plutonium".parse::<Resource>().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownResource { kind: "resource", .. }
        ));
    }

    #[test]
    fn test_severity_is_ordered() {
        assert!(Severity::Clear < Severity::Minor);
        assert!(Severity::Major < Severity::Critical);
        assert!(Severity::default().is_clear());
    }

    #[test]
    fn test_display_uses_spaces() {
        assert_eq!(TacticalPosition::SniperPositions.to_string(), "sniper positions");
        assert_eq!(Resource::Money.to_string(), "money");
    }
}
