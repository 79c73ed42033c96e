//! Faction Types
//!
//! The six organizations that can take part in an encounter and the two
//! sides they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the standoff an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The negotiating / tactical response side (always the player)
    LawEnforcement,
    /// The side holding the hostages (always the adaptive opponent)
    HostageTaker,
}

impl Side {
    /// Returns the other side.
    pub fn opposing(self) -> Self {
        match self {
            Side::LawEnforcement => Side::HostageTaker,
            Side::HostageTaker => Side::LawEnforcement,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::LawEnforcement => write!(f, "law enforcement"),
            Side::HostageTaker => write!(f, "hostage takers"),
        }
    }
}

/// A faction the player or the opponent can field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Fbi,
    Cia,
    LocalPd,
    ShadowSyndicate,
    RedDragonTriad,
    LiberationFront,
}

impl Faction {
    /// Returns all faction variants.
    pub fn all() -> &'static [Faction] {
        &[
            Faction::Fbi,
            Faction::Cia,
            Faction::LocalPd,
            Faction::ShadowSyndicate,
            Faction::RedDragonTriad,
            Faction::LiberationFront,
        ]
    }

    /// The side this faction fights on.
    pub fn side(self) -> Side {
        match self {
            Faction::Fbi | Faction::Cia | Faction::LocalPd => Side::LawEnforcement,
            Faction::ShadowSyndicate | Faction::RedDragonTriad | Faction::LiberationFront => {
                Side::HostageTaker
            }
        }
    }

    /// The faction fielded against this one when an encounter is set up.
    pub fn rival(self) -> Faction {
        match self {
            Faction::Fbi => Faction::RedDragonTriad,
            Faction::Cia => Faction::ShadowSyndicate,
            Faction::LocalPd => Faction::LiberationFront,
            Faction::RedDragonTriad => Faction::Fbi,
            Faction::ShadowSyndicate => Faction::Cia,
            Faction::LiberationFront => Faction::LocalPd,
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Faction::Fbi => "FBI - Tactical Response Unit",
            Faction::Cia => "CIA - Intelligence Division",
            Faction::LocalPd => "Local Police Department",
            Faction::ShadowSyndicate => "Shadow Syndicate",
            Faction::RedDragonTriad => "Red Dragon Triad",
            Faction::LiberationFront => "Liberation Front",
        }
    }

    /// Snake-case key used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Faction::Fbi => "fbi",
            Faction::Cia => "cia",
            Faction::LocalPd => "local_pd",
            Faction::ShadowSyndicate => "shadow_syndicate",
            Faction::RedDragonTriad => "red_dragon_triad",
            Faction::LiberationFront => "liberation_front",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a faction name does not match any faction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFactionError(pub String);

impl fmt::Display for ParseFactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown faction: {}", self.0)
    }
}

impl std::error::Error for ParseFactionError {}

impl FromStr for Faction {
    type Err = ParseFactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Faction::all()
            .iter()
            .copied()
            .find(|faction| faction.key() == normalized)
            .ok_or_else(|| ParseFactionError(s.to_string()))
    }
}
