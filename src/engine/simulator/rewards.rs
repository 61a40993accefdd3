use super::domain::Scenario;
use serde::{Deserialize, Serialize};

/// A named milestone unlocked by crossing a cumulative-points threshold.
/// Tiers are independent: a high total unlocks every qualifying badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    CareerPro,
    Explorer,
    Beginner,
}

impl BadgeTier {
    /// Fixed display order, highest tier first.
    pub const fn ordered() -> [Self; 3] {
        [Self::CareerPro, Self::Explorer, Self::Beginner]
    }

    pub const fn threshold(self) -> i64 {
        match self {
            Self::CareerPro => 50,
            Self::Explorer => 30,
            Self::Beginner => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CareerPro => "Career Pro",
            Self::Explorer => "Explorer",
            Self::Beginner => "Beginner",
        }
    }
}

/// Reward points across the whole collection: each scenario contributes
/// floor(npv / 100_000), truncating toward zero, with a missing NPV counted
/// as 0. Recomputed on each read, never stored.
pub fn total_points(scenarios: &[Scenario]) -> i64 {
    scenarios
        .iter()
        .map(|scenario| (scenario.metrics.npv.unwrap_or(0.0) / 100_000.0).trunc() as i64)
        .sum()
}

/// Badges unlocked at a given point total, in fixed display order.
pub fn badges_for(points: i64) -> Vec<BadgeTier> {
    BadgeTier::ordered()
        .into_iter()
        .filter(|tier| points >= tier.threshold())
        .collect()
}
