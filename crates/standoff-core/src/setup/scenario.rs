//! Scenario Data
//!
//! Starting roster, resources, positions, and demands for an encounter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::components::{Demand, Resource, Role, TacticalPosition};

/// One hostage on the starting roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostageSeed {
    pub name: String,
    pub health: u8,
    pub stress: u8,
}

impl HostageSeed {
    pub fn new(name: impl Into<String>, health: u8, stress: u8) -> Self {
        Self {
            name: name.into(),
            health,
            stress,
        }
    }
}

/// Everything Setup needs besides the factions and the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub hostages: Vec<HostageSeed>,
    pub player_resources: BTreeMap<Resource, u32>,
    pub player_personnel: BTreeMap<Role, u32>,
    pub adversary_resources: BTreeMap<Resource, u32>,
    pub adversary_personnel: BTreeMap<Role, u32>,
    /// Positions held at the start; every other position starts unsecured
    pub secured_positions: Vec<TacticalPosition>,
    pub demands: BTreeMap<Demand, u64>,
}

impl Scenario {
    /// The bank siege: eight hostages, a ransom, transport, and a prisoner.
    pub fn first_national_bank() -> Self {
        let hostages = vec![
            HostageSeed::new("Bank Manager", 100, 80),
            HostageSeed::new("Elderly Customer", 70, 90),
            HostageSeed::new("Security Guard", 90, 60),
            HostageSeed::new("Bank Teller", 100, 75),
            HostageSeed::new("Civilian", 100, 70),
            HostageSeed::new("Young Parent", 100, 50),
            HostageSeed::new("Courier", 100, 60),
            HostageSeed::new("Student", 100, 40),
        ];

        Self {
            name: "First National Bank".to_string(),
            hostages,
            player_resources: BTreeMap::from([
                (Resource::Manpower, 5),
                (Resource::Equipment, 3),
                (Resource::Intelligence, 2),
                (Resource::Medical, 2),
                (Resource::Money, 10),
            ]),
            player_personnel: BTreeMap::from([
                (Role::Negotiator, 2),
                (Role::TacticalOfficer, 6),
                (Role::Sniper, 2),
                (Role::Medic, 2),
                (Role::Analyst, 1),
            ]),
            adversary_resources: BTreeMap::from([
                (Resource::Manpower, 4),
                (Resource::Equipment, 2),
                (Resource::Intelligence, 2),
                (Resource::Money, 0),
                (Resource::Concealment, 3),
            ]),
            adversary_personnel: BTreeMap::from([(Role::ArmedMember, 4), (Role::Lookout, 2)]),
            secured_positions: vec![
                TacticalPosition::Perimeter,
                TacticalPosition::NegotiationPoint,
                TacticalPosition::CommandPost,
            ],
            demands: BTreeMap::from([
                (Demand::Money, 1_000_000),
                (Demand::Transport, 1),
                (Demand::PrisonerRelease, 1),
            ]),
        }
    }

    /// Add positions the player holds from the start, skipping duplicates.
    pub fn with_secured_positions(
        mut self,
        positions: impl IntoIterator<Item = TacticalPosition>,
    ) -> Self {
        for position in positions {
            if !self.secured_positions.contains(&position) {
                self.secured_positions.push(position);
            }
        }
        self
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::first_national_bank()
    }
}
