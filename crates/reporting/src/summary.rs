use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use badge_engine::BadgeEngine;
use sync_core::badge::BadgeTier;
use sync_core::store::ReputationStore;

/// Per-tier tally over every business in a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub businesses: u32,
    /// Keyed by the computed tier, not the cached one.
    pub tiers: BTreeMap<BadgeTier, u32>,
    pub stale_badges: u32,
}

impl StoreSummary {
    pub fn from_store(engine: &BadgeEngine, store: &ReputationStore) -> Self {
        let mut summary = StoreSummary {
            businesses: 0,
            tiers: BadgeTier::ALL.iter().map(|tier| (*tier, 0)).collect(),
            stale_badges: 0,
        };

        for record in store.records.values() {
            let evaluation = engine.evaluate(&record.reputation());
            summary.businesses = summary.businesses.saturating_add(1);
            let slot = summary.tiers.entry(evaluation.tier).or_insert(0);
            *slot = slot.saturating_add(1);
            if evaluation.stale {
                summary.stale_badges = summary.stale_badges.saturating_add(1);
            }
        }

        summary
    }

    pub fn human_summary(&self) -> String {
        let mut lines = vec![format!("Businesses tracked: {}", self.businesses)];
        for (tier, count) in self.tiers.iter().rev() {
            lines.push(format!("  {}: {count}", tier.display_name()));
        }
        if self.stale_badges > 0 {
            lines.push(format!("{} displayed badges are out of date.", self.stale_badges));
        }
        lines.join("\n")
    }
}
