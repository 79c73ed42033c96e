//! Encounter Status Types
//!
//! Read-only views handed to the front end: objectives and how (or whether)
//! the encounter ended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the player won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryKind {
    /// Every hostage walked out
    AllHostagesReleased,
    /// High trust, low tension, and a broken adversary
    PeacefulSurrender,
    /// No adversary personnel left standing
    AdversaryNeutralized,
}

impl fmt::Display for VictoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VictoryKind::AllHostagesReleased => write!(f, "All hostages released"),
            VictoryKind::PeacefulSurrender => write!(f, "Hostage takers surrendered peacefully"),
            VictoryKind::AdversaryNeutralized => write!(f, "Hostage takers neutralized"),
        }
    }
}

/// Why the player lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    HostagesKilled,
    SituationEscalated,
    TimeRanOut,
    DeadlineExpired,
}

impl fmt::Display for DefeatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefeatReason::HostagesKilled => write!(f, "Hostages killed"),
            DefeatReason::SituationEscalated => write!(f, "Situation escalated out of control"),
            DefeatReason::TimeRanOut => write!(f, "Time ran out"),
            DefeatReason::DeadlineExpired => write!(f, "Failed to meet demands before deadline"),
        }
    }
}

/// Terminal outcome of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum EncounterOutcome {
    Victory(VictoryKind),
    Defeat(DefeatReason),
}

impl EncounterOutcome {
    pub fn is_victory(self) -> bool {
        matches!(self, EncounterOutcome::Victory(_))
    }
}

/// Answer to "is it over, and who won?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverStatus {
    pub game_over: bool,
    pub victory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory_kind: Option<VictoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defeat_reason: Option<DefeatReason>,
}

impl GameOverStatus {
    /// Status of an encounter that is still running.
    pub fn ongoing() -> Self {
        Self {
            game_over: false,
            victory: false,
            victory_kind: None,
            defeat_reason: None,
        }
    }
}

impl From<Option<EncounterOutcome>> for GameOverStatus {
    fn from(outcome: Option<EncounterOutcome>) -> Self {
        match outcome {
            None => GameOverStatus::ongoing(),
            Some(EncounterOutcome::Victory(kind)) => GameOverStatus {
                game_over: true,
                victory: true,
                victory_kind: Some(kind),
                defeat_reason: None,
            },
            Some(EncounterOutcome::Defeat(reason)) => GameOverStatus {
                game_over: true,
                victory: false,
                victory_kind: None,
                defeat_reason: Some(reason),
            },
        }
    }
}

/// A mission objective, recomputed from state on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub text: String,
    pub complete: bool,
    pub failed: bool,
    /// 1 is most important
    pub priority: u8,
}

impl Objective {
    pub fn new(text: impl Into<String>, priority: u8) -> Self {
        Self {
            text: text.into(),
            complete: false,
            failed: false,
            priority,
        }
    }

    pub fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    pub fn with_failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_outcome() {
        let ongoing = GameOverStatus::from(None);
        assert!(!ongoing.game_over);

        let won = GameOverStatus::from(Some(EncounterOutcome::Victory(
            VictoryKind::PeacefulSurrender,
        )));
        assert!(won.game_over && won.victory);
        assert_eq!(won.defeat_reason, None);

        let lost = GameOverStatus::from(Some(EncounterOutcome::Defeat(DefeatReason::TimeRanOut)));
        assert!(lost.game_over && !lost.victory);
        assert_eq!(lost.defeat_reason, Some(DefeatReason::TimeRanOut));
    }

    #[test]
    fn test_outcome_tagged_serialization() {
        let json =
            serde_json::to_string(&EncounterOutcome::Defeat(DefeatReason::DeadlineExpired)).unwrap();
        assert_eq!(json, r#"{"result":"defeat","reason":"deadline_expired"}"#);
    }
}
