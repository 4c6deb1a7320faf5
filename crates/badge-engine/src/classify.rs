use sync_core::badge::{BadgeTier, MIN_REVIEWS, TIER_DEFINITIONS};
use sync_core::reputation::clamp_percentage;

/// Tier a business earns from its approved-review count and positive share.
///
/// Fewer than [`MIN_REVIEWS`] reviews never earns a badge. Otherwise the
/// highest tier whose threshold is met wins. Out-of-range percentages are
/// clamped into 0..=100.
pub fn classify(review_count: u32, positive_percentage: f64) -> BadgeTier {
    if review_count < MIN_REVIEWS {
        return BadgeTier::NoBadge;
    }
    let percentage = clamp_percentage(positive_percentage);
    TIER_DEFINITIONS
        .iter()
        .rev()
        .find(|def| review_count >= def.min_reviews && percentage >= f64::from(def.percentage))
        .map(|def| def.tier)
        .unwrap_or(BadgeTier::NoBadge)
}
