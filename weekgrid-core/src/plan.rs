//! Freemium plan tiers.
//!
//! Stands in for the billing collaborator: the configured tier maps to
//! the [`PlanLimits`] value the core consults and to the export
//! watermark. Nothing below this module knows tier names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::limits::PlanLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Trial tier for poking around.
    Test,
    #[default]
    Free,
    /// Paid tier, no caps, no watermark.
    Pro,
}

impl Plan {
    pub fn limits(&self) -> PlanLimits {
        match self {
            Plan::Test => PlanLimits {
                max_members: Some(2),
                max_agendas: Some(1),
            },
            Plan::Free => PlanLimits {
                max_members: Some(5),
                max_agendas: Some(2),
            },
            Plan::Pro => PlanLimits::UNLIMITED,
        }
    }

    /// Exports carry a promotional watermark on non-paying tiers.
    pub fn watermarked(&self) -> bool {
        !matches!(self, Plan::Pro)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Plan::Test => write!(f, "test"),
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_limits() {
        assert_eq!(Plan::Test.limits().max_members, Some(2));
        assert_eq!(Plan::Free.limits().max_agendas, Some(2));
        assert_eq!(Plan::Pro.limits(), PlanLimits::UNLIMITED);
    }

    #[test]
    fn test_only_pro_skips_watermark() {
        assert!(Plan::Test.watermarked());
        assert!(Plan::Free.watermarked());
        assert!(!Plan::Pro.watermarked());
    }
}
