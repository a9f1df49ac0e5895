//! Gearset priority policy.
//!
//! Earlier gearsets claim owned items first. The policy is explicit and
//! configurable; every ordering is a stable sort over the store's listed
//! order so ties always resolve the same way.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::gearset::Gearset;

/// How gearsets are ordered when competing for owned items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPolicy {
    /// Store order: first-listed gearset has first claim.
    #[default]
    Listed,
    /// Alphabetical by name, ties by store order.
    ByName,
    /// Grouped by class job id, ties by store order.
    ByJob,
}

impl PriorityPolicy {
    /// Order gearsets according to the policy.
    pub fn order<'a>(&self, gearsets: &'a [Gearset]) -> Vec<&'a Gearset> {
        let mut ordered: Vec<&Gearset> = gearsets.iter().collect();
        match self {
            Self::Listed => {}
            Self::ByName => ordered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            Self::ByJob => ordered.sort_by_key(|g| g.class_job_id),
        }
        ordered
    }
}

impl FromStr for PriorityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "listed" => Ok(Self::Listed),
            "by_name" | "name" => Ok(Self::ByName),
            "by_job" | "job" => Ok(Self::ByJob),
            _ => Err(format!("unknown priority policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Vec<Gearset> {
        vec![
            Gearset::new("Savage", vec![]).with_job(24),
            Gearset::new("alt", vec![]).with_job(19),
            Gearset::new("Crafted", vec![]).with_job(24),
        ]
    }

    fn names(ordered: Vec<&Gearset>) -> Vec<&str> {
        ordered.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn listed_keeps_store_order() {
        let sets = sets();
        assert_eq!(
            names(PriorityPolicy::Listed.order(&sets)),
            vec!["Savage", "alt", "Crafted"]
        );
    }

    #[test]
    fn by_name_is_case_insensitive() {
        let sets = sets();
        assert_eq!(
            names(PriorityPolicy::ByName.order(&sets)),
            vec!["alt", "Crafted", "Savage"]
        );
    }

    #[test]
    fn by_job_is_stable_within_a_job() {
        let sets = sets();
        assert_eq!(
            names(PriorityPolicy::ByJob.order(&sets)),
            vec!["alt", "Savage", "Crafted"]
        );
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("by-name".parse(), Ok(PriorityPolicy::ByName));
        assert_eq!("listed".parse(), Ok(PriorityPolicy::Listed));
        assert!("random".parse::<PriorityPolicy>().is_err());
    }
}
