use serde::{Deserialize, Serialize};

use sync_core::badge::{BadgeTier, TierDefinition, MIN_REVIEWS, TIER_DEFINITIONS};
use sync_core::reputation::{clamp_percentage, positive_count};

/// The next badge a business can work toward.
///
/// `reviews_needed` is a best-case figure: it counts additional reviews that
/// must *all* be positive. Any negative review in the interim pushes the
/// real number higher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierProjection {
    pub tier: BadgeTier,
    pub name: String,
    pub percentage: u8,
    pub reviews_needed: u32,
}

impl TierProjection {
    fn toward(def: &TierDefinition, reviews_needed: u32) -> Self {
        Self {
            tier: def.tier,
            name: def.name.to_string(),
            percentage: def.percentage,
            reviews_needed,
        }
    }
}

/// Projects the next tier from the tier currently shown and the driving counts.
///
/// Returns `None` only once the top tier is reached. A `None` current tier is
/// read the same as no badge.
pub fn next_tier(
    current: Option<BadgeTier>,
    review_count: u32,
    positive_percentage: f64,
) -> Option<TierProjection> {
    let current = current.unwrap_or(BadgeTier::NoBadge);
    if current.is_terminal() {
        return None;
    }

    let [recommended, highly, very_highly] = &TIER_DEFINITIONS;

    // The percentage is not meaningful until the sample is large enough.
    if review_count < MIN_REVIEWS {
        return Some(TierProjection::toward(recommended, MIN_REVIEWS - review_count));
    }

    let target = match current {
        BadgeTier::NoBadge | BadgeTier::Recommended => {
            if positive_percentage < f64::from(recommended.percentage) {
                recommended
            } else {
                highly
            }
        }
        BadgeTier::HighlyRecommended | BadgeTier::VeryHighlyRecommended => very_highly,
    };

    let needed = reviews_needed(review_count, positive_percentage, target.percentage)?;
    Some(TierProjection::toward(target, needed))
}

/// Consecutive positive reviews needed to lift the positive share to `target_percentage`.
///
/// Solves `(P + X) / (n + X) >= t / 100` for the smallest whole `X`, with
/// `P = round(n * percentage / 100)`. A target of 100% or more can never be
/// reached by adding reviews to a sample that has a negative one, so it
/// yields `None`.
pub fn reviews_needed(
    review_count: u32,
    positive_percentage: f64,
    target_percentage: u8,
) -> Option<u32> {
    if target_percentage >= 100 {
        return None;
    }
    let n = i64::from(review_count);
    let positive = i64::from(positive_count(review_count, positive_percentage));
    let target = i64::from(target_percentage);

    let shortfall = target * n - 100 * positive;
    if shortfall <= 0 {
        return Some(0);
    }
    let headroom = 100 - target;
    let needed = (shortfall + headroom - 1) / headroom;
    Some(u32::try_from(needed).unwrap_or(u32::MAX))
}

/// Like [`reviews_needed`], but from the unrounded positive share.
///
/// This is the count after which [`classify`](crate::classify::classify)
/// actually reports the target, which can exceed the rounded figure when
/// the positive count rounds up onto the threshold.
pub fn reviews_needed_unrounded(
    review_count: u32,
    positive_percentage: f64,
    target_percentage: u8,
) -> Option<u32> {
    if target_percentage >= 100 {
        return None;
    }
    let n = f64::from(review_count);
    let target = f64::from(target_percentage);
    let shortfall = target * n - clamp_percentage(positive_percentage) * n;
    if shortfall <= 0.0 {
        return Some(0);
    }
    let needed = (shortfall / (100.0 - target)).ceil();
    Some(needed.min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use proptest::prelude::*;

    #[test]
    fn test_below_minimum_sample() {
        let projection = next_tier(None, 1, 0.0).unwrap();
        assert_eq!(projection.name, "Recommended");
        assert_eq!(projection.percentage, 75);
        assert_eq!(projection.reviews_needed, 2);

        let projection = next_tier(Some(BadgeTier::NoBadge), 0, 100.0).unwrap();
        assert_eq!(projection.tier, BadgeTier::Recommended);
        assert_eq!(projection.reviews_needed, 3);
    }

    #[test]
    fn test_highly_to_very_highly() {
        let projection = next_tier(Some(BadgeTier::HighlyRecommended), 20, 90.0).unwrap();
        assert_eq!(projection.name, "Very Highly Recommended");
        assert_eq!(projection.percentage, 95);
        assert_eq!(projection.reviews_needed, 20);
    }

    #[test]
    fn test_unbadged_below_threshold() {
        // 10 reviews at 50% -> P = 5, (750 - 500) / 25 = 10
        let projection = next_tier(None, 10, 50.0).unwrap();
        assert_eq!(projection.tier, BadgeTier::Recommended);
        assert_eq!(projection.reviews_needed, 10);
    }

    #[test]
    fn test_recommended_targets_highly() {
        // 10 reviews at 80% -> P = 8, (900 - 800) / 10 = 10
        let projection = next_tier(Some(BadgeTier::Recommended), 10, 80.0).unwrap();
        assert_eq!(projection.tier, BadgeTier::HighlyRecommended);
        assert_eq!(projection.percentage, 90);
        assert_eq!(projection.reviews_needed, 10);
    }

    #[test]
    fn test_top_tier_is_terminal() {
        assert!(next_tier(Some(BadgeTier::VeryHighlyRecommended), 50, 96.0).is_none());
        assert!(next_tier(Some(BadgeTier::VeryHighlyRecommended), 1, 0.0).is_none());
    }

    #[test]
    fn test_stale_tier_clamps_to_zero() {
        let projection = next_tier(Some(BadgeTier::HighlyRecommended), 40, 99.0).unwrap();
        assert_eq!(projection.reviews_needed, 0);
    }

    #[test]
    fn test_full_threshold_unreachable() {
        assert_eq!(reviews_needed(10, 50.0, 100), None);
        assert_eq!(reviews_needed(10, 50.0, 75), Some(10));
    }

    #[test]
    fn test_rounded_count_on_threshold() {
        // 74.5% of 100 rounds to 75 positives, but the share is still below 75%
        assert_eq!(reviews_needed(100, 74.5, 75), Some(0));
        assert_eq!(reviews_needed_unrounded(100, 74.5, 75), Some(2));
        assert_eq!(classify(101, 75.5 * 100.0 / 101.0), BadgeTier::NoBadge);
        assert_eq!(classify(102, 76.5 * 100.0 / 102.0), BadgeTier::Recommended);
        assert_eq!(reviews_needed_unrounded(10, 50.0, 100), None);
        assert_eq!(reviews_needed_unrounded(10, 80.0, 75), Some(0));
    }

    proptest! {
        #[test]
        fn prop_none_only_at_top_tier(
            tier_idx in 0usize..5,
            count in 0u32..10_000,
            pct in 0.0f64..=100.0,
        ) {
            let current = if tier_idx == 4 { None } else { Some(BadgeTier::ALL[tier_idx]) };
            let projection = next_tier(current, count, pct);
            let at_top = current == Some(BadgeTier::VeryHighlyRecommended);
            prop_assert_eq!(projection.is_none(), at_top);
        }

        #[test]
        fn prop_never_moves_backward(count in 0u32..10_000, pct in 0.0f64..=100.0) {
            let current = classify(count, pct);
            if let Some(projection) = next_tier(Some(current), count, pct) {
                prop_assert!(projection.tier > current);
            }
        }

        #[test]
        fn prop_projection_reaches_target(count in 3u32..2_000, positive_share in 0.0f64..=1.0) {
            let positive = ((f64::from(count) * positive_share).floor() as u32).min(count);
            let pct = f64::from(positive) * 100.0 / f64::from(count);
            let current = classify(count, pct);
            if let Some(projection) = next_tier(Some(current), count, pct) {
                let added = projection.reviews_needed;
                let new_count = count + added;
                let new_pct = f64::from(positive + added) * 100.0 / f64::from(new_count);
                prop_assert_eq!(classify(new_count, new_pct), projection.tier);
            }
        }
    }
}
