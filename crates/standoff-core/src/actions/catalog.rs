//! Action Catalog
//!
//! Name-indexed lookup over both sides' actions. Built once per encounter and
//! never mutated.

use std::collections::BTreeMap;

use standoff_events::{ActionCategory, Faction};
use tracing::error;

use super::{hostage_taker, law_enforcement, ActionDefinition};
use crate::error::EngineError;

/// Immutable catalog of every action either side can attempt.
#[derive(Debug, Clone)]
pub struct Catalog {
    actions: Vec<ActionDefinition>,
    by_name: BTreeMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from definitions. Later duplicates are ignored.
    pub fn new(definitions: Vec<ActionDefinition>) -> Self {
        let mut actions = Vec::with_capacity(definitions.len());
        let mut by_name = BTreeMap::new();
        for definition in definitions {
            if by_name.contains_key(&definition.name) {
                continue;
            }
            by_name.insert(definition.name.clone(), actions.len());
            actions.push(definition);
        }
        Self { actions, by_name }
    }

    /// The full catalog of both sides.
    pub fn standard() -> Self {
        let mut definitions = law_enforcement::actions();
        definitions.extend(hostage_taker::actions());
        Self::new(definitions)
    }

    pub fn get(&self, name: &str) -> Option<&ActionDefinition> {
        self.by_name.get(name).map(|&index| &self.actions[index])
    }

    /// Lookup that treats a missing name as a catalog bug.
    pub fn require(&self, name: &str) -> Result<&ActionDefinition, EngineError> {
        self.get(name).ok_or_else(|| {
            error!(action = name, "Unknown action requested");
            EngineError::UnknownAction(name.to_string())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Everything a faction may use, in catalog order.
    pub fn for_faction(&self, faction: Faction) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.iter().filter(move |a| a.usable_by(faction))
    }

    /// A faction's actions grouped by category.
    pub fn by_category(&self, faction: Faction) -> BTreeMap<ActionCategory, Vec<&ActionDefinition>> {
        let mut grouped: BTreeMap<ActionCategory, Vec<&ActionDefinition>> = BTreeMap::new();
        for action in self.for_faction(faction) {
            grouped.entry(action.category).or_default().push(action);
        }
        grouped
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use standoff_events::Side;

    #[test]
    fn test_names_are_unique() {
        let mut definitions = law_enforcement::actions();
        definitions.extend(hostage_taker::actions());
        let names: BTreeSet<_> = definitions.iter().map(|a| a.name.clone()).collect();
        assert_eq!(names.len(), definitions.len());
        assert_eq!(Catalog::standard().len(), definitions.len());
    }

    #[test]
    fn test_unknown_action() {
        let catalog = Catalog::standard();
        assert!(matches!(
            catalog.require("Summon Dragons"),
            Err(EngineError::UnknownAction(_))
        ));
        assert!(catalog.require("Sniper Shot").is_ok());
    }

    #[test]
    fn test_faction_views_stay_on_their_side() {
        let catalog = Catalog::standard();
        for faction in Faction::all() {
            for action in catalog.for_faction(*faction) {
                assert_eq!(action.side, faction.side());
            }
        }
        let fbi: Vec<_> = catalog.for_faction(Faction::Fbi).map(|a| a.name.as_str()).collect();
        assert!(fbi.contains(&"Rapid Response Team"));
        assert!(!fbi.contains(&"Shadow Protocol"));
        assert!(!fbi.contains(&"Execute Hostage"));
    }

    #[test]
    fn test_grouping_by_category() {
        let catalog = Catalog::standard();
        let grouped = catalog.by_category(Faction::Cia);
        let tech = grouped.get(&ActionCategory::Tech).expect("tech actions");
        assert!(tech.iter().any(|a| a.name == "Shadow Protocol"));
        assert!(grouped
            .values()
            .flatten()
            .all(|a| a.side == Side::LawEnforcement));
    }
}
