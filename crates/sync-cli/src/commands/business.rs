use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use badge_engine::BadgeEngine;
use reporting::{BadgeReport, RenderOptions};
use sync_core::config::Config;
use sync_core::error::SyncError;
use sync_core::ids::BusinessId;
use sync_core::reputation::ReputationSnapshot;
use sync_core::store::ReputationStore;

use super::{Overrides, Session};

#[derive(Debug)]
pub enum BusinessAction {
    Import { input: PathBuf },
    Review { business: String, positive: bool },
}

/// One business in an import file; ids are generated when missing.
#[derive(Debug, Deserialize)]
pub struct ImportEntry {
    pub business_id: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub snapshot: ReputationSnapshot,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<ImportEntry>),
    One(ImportEntry),
}

pub fn execute(overrides: &Overrides, action: BusinessAction) -> Result<()> {
    let session = Session::resolve(overrides)?;
    let mut store = ReputationStore::load(&session.store_path)?;
    let engine = BadgeEngine::new();

    match action {
        BusinessAction::Import { input } => {
            let entries = read_import(&input)?;
            let imported = import_entries(&mut store, entries);
            store.save(&session.store_path)?;
            for id in &imported {
                println!("Imported {id}");
            }
            println!("{} businesses imported", imported.len());
        }
        BusinessAction::Review { business, positive } => {
            let id = BusinessId::new(business);
            let report = review_business(&mut store, &engine, &session.config, &id, positive)?;
            store.save(&session.store_path)?;
            let options = RenderOptions::from(&session.config.display);
            println!("{}", report.human_summary(options));
        }
    }
    Ok(())
}

pub fn read_import(path: &Path) -> Result<Vec<ImportEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read import file {}", path.display()))?;
    parse_import(&contents)
}

pub fn parse_import(contents: &str) -> Result<Vec<ImportEntry>> {
    let file: ImportFile = serde_json::from_str(contents).context("parse import JSON")?;
    Ok(match file {
        ImportFile::Many(entries) => entries,
        ImportFile::One(entry) => vec![entry],
    })
}

/// Counts one review, then writes the computed tier back as the cached
/// badge when `sync.refresh_cached_badges` is set.
pub fn review_business(
    store: &mut ReputationStore,
    engine: &BadgeEngine,
    config: &Config,
    id: &BusinessId,
    positive: bool,
) -> Result<BadgeReport, SyncError> {
    let record = store.record_review(id, positive)?;
    let report = BadgeReport::from_record(engine, record);
    if config.sync.refresh_cached_badges {
        store.set_badge(id, report.evaluation.tier)?;
    }
    tracing::info!(
        business = %id,
        positive,
        tier = %report.evaluation.tier,
        "recorded review"
    );
    Ok(report)
}

pub fn import_entries(
    store: &mut ReputationStore,
    entries: Vec<ImportEntry>,
) -> Vec<BusinessId> {
    entries
        .into_iter()
        .map(|entry| {
            let id = entry
                .business_id
                .map(BusinessId::new)
                .unwrap_or_else(BusinessId::generate);
            store.upsert_snapshot(id.clone(), entry.name, &entry.snapshot);
            id
        })
        .collect()
}
