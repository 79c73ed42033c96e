//! Action Categories
//!
//! The closed set of categories every action belongs to. Behavior keyed by
//! category (metric shifts, chance modifiers, opponent weights) lives in the
//! engine; this crate only names them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// Talking: opening lines, empathy, questions
    Dialogue,
    /// Bargaining over hostages, demands, and time
    Negotiation,
    /// Positioning people and establishing control of the site
    Tactical,
    /// Acquiring or spending people, equipment, and money
    Resources,
    /// Physical force against the other side
    Force,
    /// Surveillance, hacking, utilities
    Tech,
    /// Explicit threats
    Threats,
    /// Stating or escalating demands
    Demands,
    /// Misinformation and feints
    Deception,
    /// Pressure on the other side's nerve
    Psychological,
}

impl ActionCategory {
    /// Returns all category variants in declaration order.
    pub fn all() -> &'static [ActionCategory] {
        &[
            ActionCategory::Dialogue,
            ActionCategory::Negotiation,
            ActionCategory::Tactical,
            ActionCategory::Resources,
            ActionCategory::Force,
            ActionCategory::Tech,
            ActionCategory::Threats,
            ActionCategory::Demands,
            ActionCategory::Deception,
            ActionCategory::Psychological,
        ]
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ActionCategory::Dialogue => "Dialogue",
            ActionCategory::Negotiation => "Negotiation",
            ActionCategory::Tactical => "Tactical",
            ActionCategory::Resources => "Resources",
            ActionCategory::Force => "Force",
            ActionCategory::Tech => "Tech",
            ActionCategory::Threats => "Threats",
            ActionCategory::Demands => "Demands",
            ActionCategory::Deception => "Deception",
            ActionCategory::Psychological => "Psychological",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_and_complete() {
        let all = ActionCategory::all();
        assert_eq!(all.len(), 10);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
