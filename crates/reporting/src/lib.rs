use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use badge_engine::{reviews_needed_unrounded, BadgeEngine, BadgeEvaluation, TierProjection};
use sync_core::badge::{BadgeSignal, BadgeTier};
use sync_core::config::DisplayConfig;
use sync_core::ids::BusinessId;
use sync_core::store::ReputationRecord;

pub mod json;
pub mod summary;

pub use summary::StoreSummary;

const ASSUMPTION_NOTE: &str = "Assumes every new review is positive.";

/// Controls which optional lines appear in a human summary.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_projection: bool,
    pub show_assumption_note: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeReport {
    pub business_id: BusinessId,
    pub name: Option<String>,
    pub approved_review_count: u32,
    pub recommendation_percentage: f64,
    pub evaluation: BadgeEvaluation,
    pub signal: BadgeSignal,
    pub generated_at: OffsetDateTime,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_projection: true,
            show_assumption_note: true,
        }
    }
}

impl From<&DisplayConfig> for RenderOptions {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            show_projection: display.show_projection,
            show_assumption_note: display.show_assumption_note,
        }
    }
}

impl BadgeReport {
    pub fn from_record(engine: &BadgeEngine, record: &ReputationRecord) -> Self {
        let evaluation = engine.evaluate(&record.reputation());
        let signal = badge_signal_for_tier(evaluation.tier);
        Self {
            business_id: record.business_id.clone(),
            name: record.name.clone(),
            approved_review_count: record.approved_review_count,
            recommendation_percentage: record.recommendation_percentage,
            evaluation,
            signal,
            generated_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.business_id.to_string(),
        }
    }

    pub fn human_summary(&self, options: RenderOptions) -> String {
        let mut lines = vec![
            format!(
                "{}: {} ({} approved reviews, {:.2}% positive)",
                self.title(),
                self.evaluation.tier.display_name(),
                self.approved_review_count,
                self.recommendation_percentage
            ),
            self.signal.message.clone(),
        ];

        if self.evaluation.stale {
            let cached = self
                .evaluation
                .cached_tier
                .map(|tier| tier.display_name())
                .unwrap_or("No badge");
            lines.push(format!("Displayed badge is out of date: {cached}."));
        }

        if options.show_projection {
            match &self.evaluation.projection {
                Some(projection) => {
                    lines.push(projection_copy(
                        self.evaluation.tier,
                        self.approved_review_count,
                        self.recommendation_percentage,
                        projection,
                    ));
                    let needs_reviews = projection.reviews_needed > 0
                        || self.evaluation.tier < projection.tier;
                    if options.show_assumption_note && needs_reviews {
                        lines.push(ASSUMPTION_NOTE.to_string());
                    }
                }
                None => lines.push("Top badge reached.".to_string()),
            }
        }

        lines.join("\n")
    }
}

/// "N more positive reviews needed" copy for a projection.
pub fn projection_line(projection: &TierProjection) -> String {
    match projection.reviews_needed {
        0 => format!(
            "Eligible for {} ({}%) on the next badge refresh.",
            projection.name, projection.percentage
        ),
        1 => format!(
            "1 more positive review needed to reach {} ({}%).",
            projection.name, projection.percentage
        ),
        n => format!(
            "{n} more positive reviews needed to reach {} ({}%).",
            projection.name, projection.percentage
        ),
    }
}

/// Projection copy that stays truthful when the rounded positive count
/// already meets the target but the classifier does not.
pub fn projection_copy(
    tier: BadgeTier,
    review_count: u32,
    positive_percentage: f64,
    projection: &TierProjection,
) -> String {
    if projection.reviews_needed > 0 || tier >= projection.tier {
        return projection_line(projection);
    }
    let needed = reviews_needed_unrounded(review_count, positive_percentage, projection.percentage)
        .unwrap_or(1)
        .max(1);
    let reviews = if needed == 1 { "review" } else { "reviews" };
    format!(
        "At the {} ({}%) threshold after rounding; {needed} more positive {reviews} needed.",
        projection.name, projection.percentage
    )
}

pub fn badge_signal_for_tier(tier: BadgeTier) -> BadgeSignal {
    BadgeSignal::from_tier(tier)
}
