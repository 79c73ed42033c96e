//! Action Results
//!
//! The record produced every time either side resolves an action. The same
//! record is appended to the encounter history.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::ActionCategory;
use crate::faction::{Faction, Side};

/// Classification of a resolved action, derived from the roll and the
/// effective success chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    CriticalSuccess,
    Success,
    PartialSuccess,
    Failure,
    CriticalFailure,
}

impl OutcomeClass {
    /// True for every success class, partial included.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            OutcomeClass::CriticalSuccess | OutcomeClass::Success | OutcomeClass::PartialSuccess
        )
    }

    /// True for critical success and critical failure.
    pub fn is_critical(self) -> bool {
        matches!(self, OutcomeClass::CriticalSuccess | OutcomeClass::CriticalFailure)
    }

    /// Multiplier applied to resource and personnel deltas.
    pub fn effect_multiplier(self) -> f32 {
        match self {
            OutcomeClass::CriticalSuccess => 1.5,
            OutcomeClass::CriticalFailure => 0.5,
            _ => 1.0,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::CriticalSuccess => "critical success",
            OutcomeClass::Success => "success",
            OutcomeClass::PartialSuccess => "partial success",
            OutcomeClass::Failure => "failure",
            OutcomeClass::CriticalFailure => "critical failure",
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of one resolved action attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Turn the action was taken on
    pub turn: u32,
    /// Side that acted
    pub actor: Side,
    /// Faction that acted
    pub faction: Faction,
    /// Catalog name of the action
    pub action: String,
    pub category: ActionCategory,
    pub outcome: OutcomeClass,
    /// Random draw in [0, 1)
    pub roll: f32,
    /// Success chance after all modifiers
    pub effective_chance: f32,
    /// Action points deducted from the acting side
    pub ap_charged: u32,
    /// Human-readable descriptions of what changed
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialogue_text: Option<String>,
}

impl ActionResult {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_success()
    }

    /// One-line summary for logs and terminal output.
    pub fn summary(&self) -> String {
        format!(
            "[turn {}] {} ({}) used {} -> {} (roll {:.2} vs {:.2})",
            self.turn,
            self.faction,
            self.actor,
            self.action,
            self.outcome,
            self.roll,
            self.effective_chance
        )
    }
}

/// Entries in the encounter history are the results themselves.
pub type HistoryEntry = ActionResult;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(outcome: OutcomeClass) -> ActionResult {
        ActionResult {
            turn: 2,
            actor: Side::LawEnforcement,
            faction: Faction::Fbi,
            action: "Open Communication".to_string(),
            category: ActionCategory::Dialogue,
            outcome,
            roll: 0.1,
            effective_chance: 0.9,
            ap_charged: 1,
            descriptions: vec!["Negotiation point secured".to_string()],
            dialogue_text: None,
        }
    }

    #[test]
    fn test_outcome_classes() {
        assert!(OutcomeClass::PartialSuccess.is_success());
        assert!(!OutcomeClass::CriticalFailure.is_success());
        assert!(OutcomeClass::CriticalFailure.is_critical());
        assert!(!OutcomeClass::Success.is_critical());
        assert_eq!(OutcomeClass::CriticalSuccess.effect_multiplier(), 1.5);
        assert_eq!(OutcomeClass::PartialSuccess.effect_multiplier(), 1.0);
    }

    #[test]
    fn test_result_serialization_skips_missing_dialogue() {
        let result = sample(OutcomeClass::Success);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("dialogue_text"));
        assert!(json.contains("\"outcome\":\"success\""));

        let parsed: ActionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_summary_mentions_action() {
        let summary = sample(OutcomeClass::CriticalFailure).summary();
        assert!(summary.contains("Open Communication"));
        assert!(summary.contains("critical failure"));
    }
}
