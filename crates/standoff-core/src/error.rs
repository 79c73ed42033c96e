//! Error Types
//!
//! Two families: `EngineError` for catalog and configuration bugs that should
//! surface loudly, and `Rejection` for player input the rules refuse. A
//! rejection always leaves the situation untouched.

use standoff_events::Faction;

use crate::config::ConfigError;

/// Errors that indicate a programming or configuration mistake.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No catalog entry with this name.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A resource, role, position, condition, or demand name did not parse.
    #[error("unknown {kind}: {name}")]
    UnknownResource {
        /// Which key family was being looked up.
        kind: &'static str,
        /// The name that failed to match.
        name: String,
    },

    /// Faction name did not parse.
    #[error("unknown faction: {0}")]
    UnknownFaction(String),

    /// The player must lead the law-enforcement response.
    #[error("{0} cannot be chosen by the player; pick a law-enforcement faction")]
    UnsupportedPlayerFaction(Faction),

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reasons an action attempt is refused before anything is rolled or charged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("not enough action points for {action}: needs {required}, {available} left")]
    InsufficientActionPoints {
        action: String,
        required: u32,
        available: u32,
    },

    #[error("{action} is on cooldown for {turns_remaining} more turn(s)")]
    ActionOnCooldown { action: String, turns_remaining: u32 },

    #[error("special ability {action} has already been used this turn")]
    SpecialAbilityAlreadyUsed { action: String },

    #[error("{faction} cannot use {action}")]
    FactionIneligible { action: String, faction: Faction },

    #[error("{action} is not possible yet: {requirement}")]
    RequirementsNotMet { action: String, requirement: String },

    #[error("the encounter is already over")]
    EncounterOver,
}

impl Rejection {
    /// Short machine-friendly code for front ends and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InsufficientActionPoints { .. } => "insufficient_action_points",
            Rejection::ActionOnCooldown { .. } => "action_on_cooldown",
            Rejection::SpecialAbilityAlreadyUsed { .. } => "special_ability_already_used",
            Rejection::FactionIneligible { .. } => "faction_ineligible",
            Rejection::RequirementsNotMet { .. } => "requirements_not_met",
            Rejection::EncounterOver => "encounter_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let rejection = Rejection::InsufficientActionPoints {
            action: "Position Snipers".to_string(),
            required: 3,
            available: 2,
        };
        assert_eq!(
            rejection.to_string(),
            "not enough action points for Position Snipers: needs 3, 2 left"
        );
        assert_eq!(rejection.code(), "insufficient_action_points");
    }

    #[test]
    fn test_unknown_resource_message() {
        let err = EngineError::UnknownResource {
            kind: "resource",
            name: "plutonium".to_string(),
        };
        assert_eq!(err.to_string(), "unknown resource: plutonium");
    }
}
