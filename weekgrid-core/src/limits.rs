//! Plan-limit capability checks.
//!
//! The mutation store consults an injected [`PlanLimits`] value before
//! allowing growth; how the limits were computed (tier, billing state)
//! is the frontend's business. Hitting a cap is never an error, only a
//! capability the caller should have checked.

use serde::{Deserialize, Serialize};

/// Caps on what an account may create. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlanLimits {
    pub max_members: Option<u32>,
    pub max_agendas: Option<u32>,
}

impl PlanLimits {
    pub const UNLIMITED: PlanLimits = PlanLimits {
        max_members: None,
        max_agendas: None,
    };

    /// May an agenda hold `count` members?
    pub fn allows_members(&self, count: usize) -> bool {
        self.max_members.is_none_or(|max| count <= max as usize)
    }

    /// May an account hold `count` agendas?
    pub fn allows_agendas(&self, count: usize) -> bool {
        self.max_agendas.is_none_or(|max| count <= max as usize)
    }

    pub fn can_add_member(&self, current: usize) -> bool {
        self.allows_members(current + 1)
    }

    pub fn can_create_agenda(&self, existing: usize) -> bool {
        self.allows_agendas(existing + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_allows_everything() {
        assert!(PlanLimits::UNLIMITED.can_add_member(10_000));
        assert!(PlanLimits::UNLIMITED.can_create_agenda(10_000));
    }

    #[test]
    fn test_member_cap_is_inclusive() {
        let limits = PlanLimits {
            max_members: Some(5),
            max_agendas: None,
        };
        assert!(limits.can_add_member(4));
        assert!(!limits.can_add_member(5));
    }

    #[test]
    fn test_agenda_cap() {
        let limits = PlanLimits {
            max_members: None,
            max_agendas: Some(1),
        };
        assert!(limits.can_create_agenda(0));
        assert!(!limits.can_create_agenda(1));
    }
}
