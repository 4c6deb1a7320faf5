use serde::{Deserialize, Serialize};

use crate::badge::BadgeTier;

/// Reputation fields of a business that drive its badge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessReputation {
    pub approved_review_count: u32,
    /// Share of approved reviews that recommend the business, 0 to 100.
    pub positive_review_percentage: f64,
    /// Tier cached upstream; `None` when the record carried `null`.
    pub badge_tier: Option<BadgeTier>,
}

/// Record shape as delivered by the hosted reputation store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationSnapshot {
    #[serde(default)]
    pub approved_review_count: i64,
    #[serde(default)]
    pub recommendation_percentage: f64,
    #[serde(default)]
    pub recommendation_badge: Option<BadgeTier>,
}

impl BusinessReputation {
    pub fn new(approved_review_count: u32, positive_review_percentage: f64) -> Self {
        Self {
            approved_review_count,
            positive_review_percentage: clamp_percentage(positive_review_percentage),
            badge_tier: None,
        }
    }

    pub fn with_cached_tier(mut self, tier: Option<BadgeTier>) -> Self {
        self.badge_tier = tier;
        self
    }

    /// Positive reviews re-derived from the stored percentage.
    pub fn positive_count(&self) -> u32 {
        positive_count(self.approved_review_count, self.positive_review_percentage)
    }
}

impl From<&ReputationSnapshot> for BusinessReputation {
    fn from(snapshot: &ReputationSnapshot) -> Self {
        BusinessReputation::new(
            clamp_count(snapshot.approved_review_count),
            snapshot.recommendation_percentage,
        )
        .with_cached_tier(snapshot.recommendation_badge)
    }
}

/// Forces a percentage into 0..=100; NaN reads as 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn clamp_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// `round(count * percentage / 100)`, the positive count implied by a percentage.
pub fn positive_count(count: u32, percentage: f64) -> u32 {
    let positive = (f64::from(count) * clamp_percentage(percentage) / 100.0).round();
    (positive as u32).min(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-5.0), 0.0);
        assert_eq!(clamp_percentage(120.0), 100.0);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
        assert_eq!(clamp_percentage(42.5), 42.5);
    }

    #[test]
    fn test_snapshot_conversion_clamps() {
        let snapshot = ReputationSnapshot {
            approved_review_count: -4,
            recommendation_percentage: 180.0,
            recommendation_badge: Some(BadgeTier::Recommended),
        };
        let reputation = BusinessReputation::from(&snapshot);
        assert_eq!(reputation.approved_review_count, 0);
        assert_eq!(reputation.positive_review_percentage, 100.0);
        assert_eq!(reputation.badge_tier, Some(BadgeTier::Recommended));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let json = r#"{"approved_review_count": 12, "recommendation_percentage": 91.67,
            "recommendation_badge": null}"#;
        let snapshot: ReputationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.approved_review_count, 12);
        assert!(snapshot.recommendation_badge.is_none());

        let json = r#"{"approved_review_count": 4, "recommendation_percentage": 75,
            "recommendation_badge": "recommended"}"#;
        let snapshot: ReputationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.recommendation_badge, Some(BadgeTier::Recommended));
    }

    #[test]
    fn test_positive_count() {
        assert_eq!(positive_count(20, 90.0), 18);
        assert_eq!(positive_count(12, 91.67), 11);
        assert_eq!(positive_count(3, 66.67), 2);
        assert_eq!(positive_count(0, 100.0), 0);
    }
}
