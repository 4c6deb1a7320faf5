use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::badge::BadgeTier;
use crate::error::SyncError;
use crate::ids::BusinessId;
use crate::reputation::{
    clamp_count, clamp_percentage, positive_count, BusinessReputation, ReputationSnapshot,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationRecord {
    pub business_id: BusinessId,
    pub name: Option<String>,
    pub approved_review_count: u32,
    pub positive_review_count: u32,
    pub recommendation_percentage: f64,
    pub recommendation_badge: Option<BadgeTier>,
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReputationStore {
    pub records: HashMap<BusinessId, ReputationRecord>,
}

impl ReputationRecord {
    pub fn reputation(&self) -> BusinessReputation {
        BusinessReputation::new(self.approved_review_count, self.recommendation_percentage)
            .with_cached_tier(self.recommendation_badge)
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.business_id),
            None => self.business_id.to_string(),
        }
    }
}

impl ReputationStore {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read reputation store {}", path.display()))?;
        let store = serde_json::from_str(&contents).context("parse reputation store JSON")?;
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create store dir {}", parent.display()))?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("render reputation store JSON")?;
        fs::write(path, contents)
            .with_context(|| format!("write reputation store {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, id: &BusinessId) -> Option<&ReputationRecord> {
        self.records.get(id)
    }

    pub fn reputation(&self, id: &BusinessId) -> Option<BusinessReputation> {
        self.records.get(id).map(ReputationRecord::reputation)
    }

    /// Replaces the stored counts with a snapshot pulled from upstream.
    pub fn upsert_snapshot(
        &mut self,
        id: BusinessId,
        name: Option<String>,
        snapshot: &ReputationSnapshot,
    ) -> &ReputationRecord {
        let now = OffsetDateTime::now_utc();
        let count = clamp_count(snapshot.approved_review_count);
        let percentage = clamp_percentage(snapshot.recommendation_percentage);
        let entry = self.records.entry(id.clone()).or_insert(ReputationRecord {
            business_id: id,
            name: None,
            approved_review_count: 0,
            positive_review_count: 0,
            recommendation_percentage: 0.0,
            recommendation_badge: None,
            last_updated: now,
        });
        if name.is_some() {
            entry.name = name;
        }
        entry.approved_review_count = count;
        entry.positive_review_count = positive_count(count, percentage);
        entry.recommendation_percentage = percentage;
        entry.recommendation_badge = snapshot.recommendation_badge;
        entry.last_updated = now;
        entry
    }

    /// Counts one newly approved review and recomputes the percentage.
    pub fn record_review(
        &mut self,
        id: &BusinessId,
        positive: bool,
    ) -> Result<&ReputationRecord, SyncError> {
        let entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| SyncError::UnknownBusiness(id.to_string()))?;
        entry.approved_review_count = entry.approved_review_count.saturating_add(1);
        if positive {
            entry.positive_review_count = entry.positive_review_count.saturating_add(1);
        }
        entry.recommendation_percentage =
            percentage_of(entry.positive_review_count, entry.approved_review_count);
        entry.last_updated = OffsetDateTime::now_utc();
        Ok(&*entry)
    }

    pub fn set_badge(&mut self, id: &BusinessId, tier: BadgeTier) -> Result<(), SyncError> {
        let entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| SyncError::UnknownBusiness(id.to_string()))?;
        entry.recommendation_badge = Some(tier);
        entry.last_updated = OffsetDateTime::now_utc();
        Ok(())
    }

    /// Number of businesses per cached badge; a `null` badge counts as none.
    pub fn tier_counts(&self) -> HashMap<BadgeTier, usize> {
        let mut counts = HashMap::new();
        for record in self.records.values() {
            let tier = record.recommendation_badge.unwrap_or(BadgeTier::NoBadge);
            *counts.entry(tier).or_insert(0) += 1;
        }
        counts
    }

    /// Records ordered by business id.
    pub fn sorted_records(&self) -> Vec<&ReputationRecord> {
        let mut records: Vec<&ReputationRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.business_id.cmp(&b.business_id));
        records
    }
}

/// Positive share as a percentage rounded to two decimal places.
pub fn percentage_of(positive: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = f64::from(positive) * 100.0 / f64::from(total);
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(count: i64, percentage: f64) -> ReputationSnapshot {
        ReputationSnapshot {
            approved_review_count: count,
            recommendation_percentage: percentage,
            recommendation_badge: None,
        }
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReputationStore::load(&dir.path().join("missing.json")).unwrap();
        assert!(store.records.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reputation.json");
        let mut store = ReputationStore::default();
        store.upsert_snapshot(
            BusinessId::from("cafe"),
            Some("Corner Cafe".to_string()),
            &snapshot(10, 80.0),
        );
        store.save(&path).unwrap();

        let loaded = ReputationStore::load(&path).unwrap();
        let record = loaded.get(&BusinessId::from("cafe")).unwrap();
        assert_eq!(record.approved_review_count, 10);
        assert_eq!(record.positive_review_count, 8);
        assert_eq!(record.name.as_deref(), Some("Corner Cafe"));
    }

    #[test]
    fn test_record_review_recomputes_percentage() {
        let mut store = ReputationStore::default();
        let id = BusinessId::from("bakery");
        store.upsert_snapshot(id.clone(), None, &snapshot(2, 100.0));

        let record = store.record_review(&id, true).unwrap();
        assert_eq!(record.approved_review_count, 3);
        assert_eq!(record.positive_review_count, 3);
        assert_eq!(record.recommendation_percentage, 100.0);

        let record = store.record_review(&id, false).unwrap();
        assert_eq!(record.approved_review_count, 4);
        assert_eq!(record.recommendation_percentage, 75.0);

        let record = store.record_review(&id, false).unwrap();
        assert_eq!(record.recommendation_percentage, 60.0);
    }

    #[test]
    fn test_record_review_unknown_business() {
        let mut store = ReputationStore::default();
        let result = store.record_review(&BusinessId::from("ghost"), true);
        assert!(matches!(result, Err(SyncError::UnknownBusiness(_))));
    }

    #[test]
    fn test_upsert_keeps_name_when_absent() {
        let mut store = ReputationStore::default();
        let id = BusinessId::from("deli");
        store.upsert_snapshot(id.clone(), Some("Deli".to_string()), &snapshot(1, 0.0));
        let record = store.upsert_snapshot(id, None, &snapshot(-3, 50.0));
        assert_eq!(record.name.as_deref(), Some("Deli"));
        assert_eq!(record.approved_review_count, 0);
        assert_eq!(record.positive_review_count, 0);
    }

    #[test]
    fn test_reputation_view() {
        let mut store = ReputationStore::default();
        let id = BusinessId::from("florist");
        store.upsert_snapshot(id.clone(), None, &snapshot(20, 90.0));
        store.set_badge(&id, BadgeTier::HighlyRecommended).unwrap();

        let reputation = store.reputation(&id).unwrap();
        assert_eq!(reputation.approved_review_count, 20);
        assert_eq!(reputation.positive_review_percentage, 90.0);
        assert_eq!(reputation.badge_tier, Some(BadgeTier::HighlyRecommended));
        assert!(store.reputation(&BusinessId::from("nope")).is_none());
    }

    #[test]
    fn test_tier_counts() {
        let mut store = ReputationStore::default();
        store.upsert_snapshot(BusinessId::from("a"), None, &snapshot(1, 0.0));
        store.upsert_snapshot(BusinessId::from("b"), None, &snapshot(10, 80.0));
        store.set_badge(&BusinessId::from("b"), BadgeTier::Recommended).unwrap();

        let counts = store.tier_counts();
        assert_eq!(counts.get(&BadgeTier::NoBadge), Some(&1));
        assert_eq!(counts.get(&BadgeTier::Recommended), Some(&1));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(0, 0), 0.0);
        assert_eq!(percentage_of(2, 3), 66.67);
        assert_eq!(percentage_of(11, 12), 91.67);
    }
}
