//! Configuration loading for encounters.
//!
//! Every tunable rule is loaded from a TOML file. Missing sections and fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete encounter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Turn structure, action points, and limits
    #[serde(default)]
    pub rules: RulesConfig,
    /// Passive hostage and situation decline at end of turn
    #[serde(default)]
    pub deterioration: DeteriorationConfig,
    /// How fast the opponent learns the player's habits
    #[serde(default)]
    pub adaptation: AdaptationConfig,
}

impl EncounterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string and validates it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values that would make an encounter unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.base_action_points == 0 {
            return Err(ConfigError::Invalid(
                "rules.base_action_points must be at least 1".to_string(),
            ));
        }
        if self.rules.adversary_action_points == 0 {
            return Err(ConfigError::Invalid(
                "rules.adversary_action_points must be at least 1".to_string(),
            ));
        }
        if self.rules.max_turns == 0 {
            return Err(ConfigError::Invalid(
                "rules.max_turns must be at least 1".to_string(),
            ));
        }
        if self.rules.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "rules.history_limit must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("deterioration.health_loss_chance", self.deterioration.health_loss_chance),
            ("deterioration.high_tension", self.deterioration.high_tension),
            (
                "deterioration.high_tension_wound_chance",
                self.deterioration.high_tension_wound_chance,
            ),
            ("adaptation.threshold", self.adaptation.threshold),
            ("adaptation.step", self.adaptation.step),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Turn structure and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Player action points granted each turn (before bonuses)
    pub base_action_points: u32,
    /// Adversary action points granted each turn
    pub adversary_action_points: u32,
    /// Defeat once the turn counter passes this
    pub max_turns: u32,
    /// Turns until the ransom deadline expires
    pub hostage_deadline: i32,
    /// Maximum retained history entries
    pub history_limit: usize,
    /// Killed hostages tolerated before defeat
    pub killed_tolerance: u32,
    /// Cooldown applied to expensive or critical actions
    pub cooldown_turns: u32,
    /// Actions costing at least this many AP go on cooldown
    pub cooldown_cost_threshold: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_action_points: 3,
            adversary_action_points: 3,
            max_turns: 15,
            hostage_deadline: 10,
            history_limit: 100,
            killed_tolerance: 0,
            cooldown_turns: 3,
            cooldown_cost_threshold: 3,
        }
    }
}

/// End-of-turn deterioration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeteriorationConfig {
    /// Stress added to each active hostage per turn
    pub stress_per_turn: u8,
    /// Stress level at which health starts to slip
    pub stress_threshold: u8,
    /// Chance per stressed hostage of losing health
    pub health_loss_chance: f32,
    /// Health lost when it slips
    pub health_loss: u8,
    /// Captured hostages below this health become wounded
    pub wound_health: u8,
    /// Tension at which hostages may be hurt
    pub high_tension: f32,
    /// Chance of a hostage being wounded under high tension
    pub high_tension_wound_chance: f32,
}

impl Default for DeteriorationConfig {
    fn default() -> Self {
        Self {
            stress_per_turn: 5,
            stress_threshold: 80,
            health_loss_chance: 0.1,
            health_loss: 10,
            wound_health: 50,
            high_tension: 0.8,
            high_tension_wound_chance: 0.3,
        }
    }
}

/// Opponent learning rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationConfig {
    /// Adaptation level needed before the opponent counters the player
    pub threshold: f32,
    /// Adaptation gained per observed player action
    pub step: f32,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            step: 0.1,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Standoff Encounter Configuration

[rules]
base_action_points = 3
adversary_action_points = 3
max_turns = 15
hostage_deadline = 10
history_limit = 100
killed_tolerance = 0
cooldown_turns = 3
cooldown_cost_threshold = 3

[deterioration]
stress_per_turn = 5
stress_threshold = 80
health_loss_chance = 0.1
health_loss = 10
wound_health = 50
high_tension = 0.8
high_tension_wound_chance = 0.3

[adaptation]
threshold = 0.5
step = 0.1
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = EncounterConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, EncounterConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[rules]
max_turns = 20
"#;
        let config = EncounterConfig::from_str(toml).unwrap();
        assert_eq!(config.rules.max_turns, 20);
        assert_eq!(config.rules.base_action_points, 3);
        assert_eq!(config.deterioration.stress_per_turn, 5);
        assert!((config.adaptation.step - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_empty_config() {
        let config = EncounterConfig::from_str("").unwrap();
        assert_eq!(config.rules.hostage_deadline, 10);
    }

    #[test]
    fn test_zero_action_points_rejected() {
        let toml = r#"
[rules]
base_action_points = 0
"#;
        let err = EncounterConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_out_of_range_chance_rejected() {
        let toml = r#"
[deterioration]
health_loss_chance = 1.5
"#;
        assert!(matches!(
            EncounterConfig::from_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = EncounterConfig::default();
        config.rules.killed_tolerance = 2;
        let text = config.to_toml().unwrap();
        let parsed = EncounterConfig::from_str(&text).unwrap();
        assert_eq!(parsed.rules.killed_tolerance, 2);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EncounterConfig::from_str("[rules\nmax_turns = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
