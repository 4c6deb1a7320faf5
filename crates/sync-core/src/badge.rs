use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

/// Minimum number of approved reviews before any badge is awarded.
pub const MIN_REVIEWS: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    #[serde(rename = "none")]
    NoBadge,
    Recommended,
    HighlyRecommended,
    VeryHighlyRecommended,
}

/// Threshold row for one awardable tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDefinition {
    pub tier: BadgeTier,
    pub name: &'static str,
    /// Whole-number positive-review percentage required, inclusive.
    pub percentage: u8,
    pub min_reviews: u32,
}

/// Awardable tiers in ascending order.
pub static TIER_DEFINITIONS: [TierDefinition; 3] = [
    TierDefinition {
        tier: BadgeTier::Recommended,
        name: "Recommended",
        percentage: 75,
        min_reviews: MIN_REVIEWS,
    },
    TierDefinition {
        tier: BadgeTier::HighlyRecommended,
        name: "Highly Recommended",
        percentage: 90,
        min_reviews: MIN_REVIEWS,
    },
    TierDefinition {
        tier: BadgeTier::VeryHighlyRecommended,
        name: "Very Highly Recommended",
        percentage: 95,
        min_reviews: MIN_REVIEWS,
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeSignal {
    pub tier: BadgeTier,
    pub message: String,
}

impl BadgeTier {
    pub const ALL: [BadgeTier; 4] = [
        BadgeTier::NoBadge,
        BadgeTier::Recommended,
        BadgeTier::HighlyRecommended,
        BadgeTier::VeryHighlyRecommended,
    ];

    pub fn definition(&self) -> Option<&'static TierDefinition> {
        definition(*self)
    }

    pub fn display_name(&self) -> &'static str {
        match self.definition() {
            Some(def) => def.name,
            None => "No badge",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BadgeTier::VeryHighlyRecommended)
    }
}

pub fn definition(tier: BadgeTier) -> Option<&'static TierDefinition> {
    TIER_DEFINITIONS.iter().find(|def| def.tier == tier)
}

impl BadgeSignal {
    pub fn from_tier(tier: BadgeTier) -> Self {
        let message = match tier {
            BadgeTier::NoBadge => "Not enough positive reviews for a badge yet.",
            BadgeTier::Recommended => "Customers recommend this business.",
            BadgeTier::HighlyRecommended => "Customers highly recommend this business.",
            BadgeTier::VeryHighlyRecommended => {
                "Customers very highly recommend this business."
            }
        };
        Self {
            tier,
            message: message.to_string(),
        }
    }
}

impl FromStr for BadgeTier {
    type Err = SyncError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(BadgeTier::NoBadge),
            "recommended" => Ok(BadgeTier::Recommended),
            "highly_recommended" => Ok(BadgeTier::HighlyRecommended),
            "very_highly_recommended" => Ok(BadgeTier::VeryHighlyRecommended),
            _ => Err(SyncError::InvalidTier(value.to_string())),
        }
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            BadgeTier::NoBadge => "none",
            BadgeTier::Recommended => "recommended",
            BadgeTier::HighlyRecommended => "highly_recommended",
            BadgeTier::VeryHighlyRecommended => "very_highly_recommended",
        };
        write!(f, "{value}")
    }
}
