use serde::{Deserialize, Serialize};
use tracing::debug;

use sync_core::badge::BadgeTier;
use sync_core::reputation::BusinessReputation;

pub mod classify;
pub mod projection;

pub use classify::classify;
pub use projection::{next_tier, reviews_needed, reviews_needed_unrounded, TierProjection};

/// Outcome of evaluating one business reputation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeEvaluation {
    /// Tier computed from the current counts.
    pub tier: BadgeTier,
    /// Tier the upstream record carried, if any.
    pub cached_tier: Option<BadgeTier>,
    /// True when the cached tier disagrees with the computed one.
    pub stale: bool,
    pub projection: Option<TierProjection>,
}

/// Stateless facade over the classifier and projector.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeEngine;

impl BadgeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classifies from the driving fields and projects from the fresh tier.
    pub fn evaluate(&self, reputation: &BusinessReputation) -> BadgeEvaluation {
        let tier = classify(
            reputation.approved_review_count,
            reputation.positive_review_percentage,
        );
        let cached_tier = reputation.badge_tier;
        let stale = cached_tier.is_some_and(|cached| cached != tier);
        let projection = next_tier(
            Some(tier),
            reputation.approved_review_count,
            reputation.positive_review_percentage,
        );

        debug!(
            reviews = reputation.approved_review_count,
            percentage = reputation.positive_review_percentage,
            %tier,
            stale,
            "evaluated badge"
        );

        BadgeEvaluation {
            tier,
            cached_tier,
            stale,
            projection,
        }
    }

    /// Projection from the cached tier, as the storefront display computes it.
    pub fn project(&self, reputation: &BusinessReputation) -> Option<TierProjection> {
        next_tier(
            reputation.badge_tier,
            reputation.approved_review_count,
            reputation.positive_review_percentage,
        )
    }

    /// Applies `count` positive reviews to the rounded positive count.
    pub fn simulate_positive_reviews(
        &self,
        reputation: &BusinessReputation,
        count: u32,
    ) -> BusinessReputation {
        let total = reputation.approved_review_count.saturating_add(count);
        let positive = reputation.positive_count().saturating_add(count);
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(positive) * 100.0 / f64::from(total)
        };
        BusinessReputation::new(total, percentage).with_cached_tier(reputation.badge_tier)
    }
}
