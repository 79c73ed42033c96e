//! Hostage Components
//!
//! Individual hostages and the status lattice they move through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health floor after a wound
pub const WOUND_HEALTH_FLOOR: u8 = 10;
/// Health lost per wound
pub const WOUND_DAMAGE: u8 = 40;

/// Where a hostage stands.
///
/// captured -> released | wounded | killed; wounded -> wounded | killed.
/// Released and killed are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HostageStatus {
    #[default]
    Captured,
    Released,
    Wounded,
    Killed,
}

impl HostageStatus {
    pub fn can_become(self, next: HostageStatus) -> bool {
        use HostageStatus::*;
        matches!(
            (self, next),
            (Captured, Released) | (Captured, Wounded) | (Captured, Killed)
                | (Wounded, Wounded)
                | (Wounded, Killed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, HostageStatus::Released | HostageStatus::Killed)
    }

    /// Still held by the hostage takers.
    pub fn is_active(self) -> bool {
        matches!(self, HostageStatus::Captured | HostageStatus::Wounded)
    }
}

impl fmt::Display for HostageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostageStatus::Captured => write!(f, "captured"),
            HostageStatus::Released => write!(f, "released"),
            HostageStatus::Wounded => write!(f, "wounded"),
            HostageStatus::Killed => write!(f, "killed"),
        }
    }
}

/// Attempted move outside the status lattice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("hostage {id} cannot go from {from} to {to}")]
pub struct InvalidTransition {
    pub id: u32,
    pub from: HostageStatus,
    pub to: HostageStatus,
}

/// A single hostage. Health and stress are 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostage {
    pub id: u32,
    pub name: String,
    status: HostageStatus,
    health: u8,
    stress: u8,
}

impl Hostage {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: HostageStatus::Captured,
            health: 100,
            stress: 50,
        }
    }

    pub fn with_health(mut self, health: u8) -> Self {
        self.health = health.min(100);
        self
    }

    pub fn with_stress(mut self, stress: u8) -> Self {
        self.stress = stress.min(100);
        self
    }

    pub fn status(&self) -> HostageStatus {
        self.status
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn stress(&self) -> u8 {
        self.stress
    }

    /// Move along the status lattice. Death zeroes health.
    pub fn transition(&mut self, next: HostageStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_become(next) {
            return Err(InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        if next == HostageStatus::Killed {
            self.health = 0;
        }
        self.status = next;
        Ok(())
    }

    /// Injure the hostage: wounded status plus [`WOUND_DAMAGE`].
    pub fn wound(&mut self) -> Result<(), InvalidTransition> {
        self.transition(HostageStatus::Wounded)?;
        self.health = self
            .health
            .saturating_sub(WOUND_DAMAGE)
            .max(WOUND_HEALTH_FLOOR);
        Ok(())
    }

    pub fn add_stress(&mut self, amount: u8) {
        self.stress = self.stress.saturating_add(amount).min(100);
    }

    /// Passive health loss. Never kills on its own.
    pub fn lose_health(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice() {
        use HostageStatus::*;
        assert!(Captured.can_become(Released));
        assert!(Captured.can_become(Wounded));
        assert!(Captured.can_become(Killed));
        assert!(Wounded.can_become(Wounded));
        assert!(Wounded.can_become(Killed));
        assert!(!Wounded.can_become(Released));
        assert!(!Wounded.can_become(Captured));
        for next in [Captured, Released, Wounded, Killed] {
            assert!(!Released.can_become(next));
            assert!(!Killed.can_become(next));
        }
    }

    #[test]
    fn test_released_hostage_cannot_be_wounded() {
        let mut hostage = Hostage::new(1, "Hostage 1");
        hostage.transition(HostageStatus::Released).unwrap();
        let err = hostage.wound().unwrap_err();
        assert_eq!(err.from, HostageStatus::Released);
        assert_eq!(hostage.status(), HostageStatus::Released);
        assert_eq!(hostage.health(), 100);
    }

    #[test]
    fn test_wounds_floor_health() {
        let mut hostage = Hostage::new(2, "Hostage 2").with_health(45);
        hostage.wound().unwrap();
        assert_eq!(hostage.health(), WOUND_HEALTH_FLOOR);
        hostage.wound().unwrap();
        assert_eq!(hostage.health(), WOUND_HEALTH_FLOOR);

        hostage.transition(HostageStatus::Killed).unwrap();
        assert_eq!(hostage.health(), 0);
        assert!(hostage.status().is_terminal());
    }

    #[test]
    fn test_stress_caps_at_100() {
        let mut hostage = Hostage::new(3, "Hostage 3").with_stress(98);
        hostage.add_stress(5);
        assert_eq!(hostage.stress(), 100);
    }
}
