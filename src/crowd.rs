//! Crowd Classifier
//!
//! 纯函数：占用率 → 拥挤等级。无副作用，不访问数据库。
//!
//! 等级边界 (占用率 = count / capacity)：
//! - `< 33%`        → low
//! - `[33%, 66%)`   → medium
//! - `>= 66%`       → high

use crate::utils::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Crowd tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdTier {
    Low,
    Medium,
    High,
}

impl CrowdTier {
    /// Advisory message shown to students
    pub fn message(&self) -> &'static str {
        match self {
            CrowdTier::Low => "Plenty of space available",
            CrowdTier::Medium => "Moderate waiting time",
            CrowdTier::High => "Long waiting time expected",
        }
    }

    /// Estimated wait in minutes (fixed per tier, a lookup not a formula)
    pub fn estimated_wait_minutes(&self) -> u32 {
        match self {
            CrowdTier::Low => 5,
            CrowdTier::Medium => 15,
            CrowdTier::High => 30,
        }
    }

    /// Display color used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            CrowdTier::Low => "white",
            CrowdTier::Medium => "orange",
            CrowdTier::High => "red",
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: CrowdTier,
    pub message: &'static str,
    pub estimated_wait_minutes: u32,
    pub color: &'static str,
}

/// Classify an occupancy count against a capacity.
///
/// 整数交叉相乘比较，33%/66% 边界不受浮点误差影响。
pub fn classify(count: u32, capacity: u32) -> AppResult<Classification> {
    if capacity == 0 {
        return Err(AppError::validation("Capacity must be at least 1"));
    }

    let count = count as u64;
    let capacity = capacity as u64;

    let tier = if count * 100 < capacity * 33 {
        CrowdTier::Low
    } else if count * 100 < capacity * 66 {
        CrowdTier::Medium
    } else {
        CrowdTier::High
    };

    Ok(Classification {
        tier,
        message: tier.message(),
        estimated_wait_minutes: tier.estimated_wait_minutes(),
        color: tier.color(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(classify(0, 0), Err(AppError::Validation(_))));
    }

    #[test]
    fn tier_boundaries_are_exact() {
        // < 33% → low
        assert_eq!(classify(0, 100).unwrap().tier, CrowdTier::Low);
        assert_eq!(classify(32, 100).unwrap().tier, CrowdTier::Low);
        // exactly 33% enters medium
        assert_eq!(classify(33, 100).unwrap().tier, CrowdTier::Medium);
        assert_eq!(classify(65, 100).unwrap().tier, CrowdTier::Medium);
        // exactly 66% enters high
        assert_eq!(classify(66, 100).unwrap().tier, CrowdTier::High);
        assert_eq!(classify(100, 100).unwrap().tier, CrowdTier::High);
    }

    #[test]
    fn boundaries_hold_for_non_round_capacities() {
        // 1/3 = 33.33% → medium, 2/3 = 66.67% → high
        assert_eq!(classify(1, 3).unwrap().tier, CrowdTier::Medium);
        assert_eq!(classify(2, 3).unwrap().tier, CrowdTier::High);
        // 32/97 = 32.99% → low
        assert_eq!(classify(32, 97).unwrap().tier, CrowdTier::Low);
    }

    #[test]
    fn wait_message_and_color_are_fixed_per_tier() {
        let c = classify(40, 100).unwrap();
        assert_eq!(c.tier, CrowdTier::Medium);
        assert_eq!(c.estimated_wait_minutes, 15);
        assert_eq!(c.message, "Moderate waiting time");
        assert_eq!(c.color, "orange");

        let c = classify(100, 100).unwrap();
        assert_eq!(c.tier, CrowdTier::High);
        assert_eq!(c.estimated_wait_minutes, 30);
        assert_eq!(c.color, "red");

        let c = classify(10, 100).unwrap();
        assert_eq!(c.tier, CrowdTier::Low);
        assert_eq!(c.estimated_wait_minutes, 5);
        assert_eq!(c.color, "white");
    }

    #[test]
    fn over_capacity_counts_stay_high() {
        assert_eq!(classify(150, 100).unwrap().tier, CrowdTier::High);
    }
}
