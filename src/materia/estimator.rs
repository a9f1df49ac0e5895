//! How many materia to have on hand before melding.
//!
//! A socket whose attach chance is `q` takes a geometric number of attempts.
//! For a target confidence `p` we want enough materia that all sockets in a
//! group succeed with probability at least `p`. Working in log space, each
//! socket contributes `d = 1 / ln(1 - q)` and the group needs
//! `ceil(ln(1 - p) * sum(d))` units.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::ItemId;

/// Absorbs floating-point noise so exact products do not round up.
const EPSILON: f64 = 1e-9;

/// Target probability that a group of melds succeeds, within `[0.01, 0.99]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Confidence(f64);

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::new)
    }
}

impl Confidence {
    pub const MIN: f64 = 0.01;
    pub const MAX: f64 = 0.99;
    pub const DEFAULT: f64 = 0.70;

    /// Clamp `p` into the supported range. NaN becomes the default.
    pub fn new(p: f64) -> Self {
        if p.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(p.clamp(Self::MIN, Self::MAX))
    }

    /// Build from a whole percentage such as a slider value.
    pub fn from_percent(percent: u8) -> Self {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// `ln(1 - p)`, always finite and negative.
    pub fn log_miss(self) -> f64 {
        (1.0 - self.0).ln()
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// How per-socket needs are rounded into a group total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round the group total once.
    #[default]
    Pooled,
    /// Round each socket separately and add them up.
    PerSlot,
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pooled" => Ok(Self::Pooled),
            "per_slot" => Ok(Self::PerSlot),
            _ => Err(format!("unknown rounding policy: {}", s)),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pooled => f.write_str("pooled"),
            Self::PerSlot => f.write_str("per slot"),
        }
    }
}

/// Outstanding sockets of one materia type.
///
/// Stores the per-socket log denominators so a confidence change can be
/// re-evaluated without walking the gearsets again.
#[derive(Debug, Clone, PartialEq)]
pub struct MateriaGroup {
    pub materia: ItemId,
    denominators: Vec<f64>,
    degenerate: usize,
}

impl MateriaGroup {
    /// An empty group.
    pub fn new(materia: ItemId) -> Self {
        Self {
            materia,
            denominators: Vec::new(),
            degenerate: 0,
        }
    }

    /// Build from attach probabilities in `[0, 1]`.
    pub fn from_probabilities(materia: ItemId, probabilities: impl IntoIterator<Item = f64>) -> Self {
        let mut group = Self::new(materia);
        for q in probabilities {
            group.push(q);
        }
        group
    }

    /// Add one socket with attach probability `q`.
    ///
    /// Sockets that always or never attach count as exactly one unit.
    pub fn push(&mut self, q: f64) {
        let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
        if q <= 0.0 || q >= 1.0 {
            self.degenerate += 1;
        } else {
            self.denominators.push(1.0 / (1.0 - q).ln());
        }
    }

    /// Number of sockets.
    pub fn slot_count(&self) -> usize {
        self.denominators.len() + self.degenerate
    }

    /// Whether the group has no sockets.
    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }
}

/// Units of a materia to hold so every socket in `group` attaches with
/// probability at least `confidence`.
pub fn materia_needed(group: &MateriaGroup, confidence: Confidence, policy: RoundingPolicy) -> u32 {
    let log_miss = confidence.log_miss();
    let degenerate = group.degenerate as u32;
    match policy {
        RoundingPolicy::Pooled => {
            if group.denominators.is_empty() {
                return degenerate;
            }
            let sum: f64 = group.denominators.iter().sum();
            let pooled = round_up(log_miss * sum);
            // floor: every open socket consumes at least one materia
            pooled.max(group.denominators.len() as u32) + degenerate
        }
        RoundingPolicy::PerSlot => {
            let per_slot: u32 = group
                .denominators
                .iter()
                .map(|d| round_up(log_miss * d).max(1))
                .sum();
            per_slot + degenerate
        }
    }
}

/// Units still to acquire after counting what is owned.
pub fn remaining(needed: u32, owned: u32) -> u32 {
    needed.saturating_sub(owned)
}

fn round_up(x: f64) -> u32 {
    let value = (x - EPSILON).ceil();
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(qs: &[f64]) -> MateriaGroup {
        MateriaGroup::from_probabilities(ItemId::new(500), qs.iter().copied())
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Confidence::new(1.0).get(), 0.99);
        assert_eq!(Confidence::new(0.0).get(), 0.01);
        assert_eq!(Confidence::new(f64::NAN).get(), 0.70);
        assert_eq!(Confidence::from_percent(85).get(), 0.85);
        assert!(Confidence::new(0.99).log_miss().is_finite());
    }

    #[test]
    fn single_socket_boundaries() {
        let g = group(&[0.7]);
        assert_eq!(materia_needed(&g, Confidence::new(0.70), RoundingPolicy::Pooled), 1);
        assert_eq!(materia_needed(&g, Confidence::new(0.91), RoundingPolicy::Pooled), 2);
        assert_eq!(materia_needed(&g, Confidence::new(0.92), RoundingPolicy::Pooled), 3);
    }

    #[test]
    fn deserialized_confidence_is_clamped() {
        let high: Confidence = serde_json::from_str("1.0").unwrap();
        assert_eq!(high.get(), Confidence::MAX);
        assert!(high.log_miss().is_finite());
        assert!(materia_needed(&group(&[0.7]), high, RoundingPolicy::Pooled) < 10);

        let low: Confidence = serde_json::from_str("-3").unwrap();
        assert_eq!(low.get(), Confidence::MIN);

        let nan: Confidence = serde_yaml::from_str(".nan").unwrap();
        assert_eq!(nan.get(), Confidence::DEFAULT);
    }

    #[test]
    fn pooled_total_is_floored_at_one_per_socket() {
        // 2 * ln(0.5) / ln(0.1) rounds up to 1, but two sockets need two
        let g = group(&[0.9, 0.9]);
        assert_eq!(materia_needed(&g, Confidence::new(0.5), RoundingPolicy::Pooled), 2);
        assert_eq!(materia_needed(&g, Confidence::new(0.5), RoundingPolicy::PerSlot), 2);
    }

    #[test]
    fn empty_group_needs_nothing() {
        let g = group(&[]);
        assert!(g.is_empty());
        assert_eq!(materia_needed(&g, Confidence::default(), RoundingPolicy::Pooled), 0);
        assert_eq!(materia_needed(&g, Confidence::default(), RoundingPolicy::PerSlot), 0);
    }

    #[test]
    fn degenerate_sockets_need_one_each() {
        let g = group(&[1.0, 0.0, 1.0]);
        assert_eq!(g.slot_count(), 3);
        assert_eq!(materia_needed(&g, Confidence::new(0.99), RoundingPolicy::Pooled), 3);
    }

    #[test]
    fn pooled_never_exceeds_per_slot() {
        let g = group(&[0.17, 0.17, 0.10, 1.0]);
        for percent in [10u8, 50, 70, 90, 99] {
            let p = Confidence::from_percent(percent);
            let pooled = materia_needed(&g, p, RoundingPolicy::Pooled);
            let per_slot = materia_needed(&g, p, RoundingPolicy::PerSlot);
            assert!(pooled <= per_slot, "p={} pooled={} per_slot={}", p, pooled, per_slot);
            assert!(pooled >= g.slot_count() as u32);
        }
    }

    #[test]
    fn need_is_monotone_in_confidence() {
        let g = group(&[0.17, 0.10, 0.7]);
        let mut last = 0;
        for percent in 1..=99u8 {
            let needed = materia_needed(&g, Confidence::from_percent(percent), RoundingPolicy::Pooled);
            assert!(needed >= last);
            last = needed;
        }
    }

    #[test]
    fn remaining_saturates() {
        assert_eq!(remaining(5, 2), 3);
        assert_eq!(remaining(2, 5), 0);
    }

    #[test]
    fn parses_rounding_policy() {
        assert_eq!("per-slot".parse(), Ok(RoundingPolicy::PerSlot));
        assert!("nearest".parse::<RoundingPolicy>().is_err());
    }
}
