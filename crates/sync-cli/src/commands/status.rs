use anyhow::Result;

use badge_engine::BadgeEngine;
use reporting::json::{render_json, render_summary_json};
use reporting::{BadgeReport, RenderOptions, StoreSummary};
use sync_core::badge::BadgeTier;
use sync_core::config::Config;
use sync_core::error::SyncError;
use sync_core::ids::BusinessId;
use sync_core::store::ReputationStore;

use super::{Overrides, Session};

pub fn execute(overrides: &Overrides, business: Option<String>, json: bool) -> Result<()> {
    let session = Session::resolve(overrides)?;
    let store = ReputationStore::load(&session.store_path)?;
    let engine = BadgeEngine::new();
    let json = json || session.config.display.json;

    let output = match business {
        Some(business) => {
            let id = BusinessId::new(business);
            render_business(&store, &engine, &session.config, &id, json)?
        }
        None => render_overview(&store, &engine, json),
    };
    println!("{}", output);
    Ok(())
}

pub fn render_business(
    store: &ReputationStore,
    engine: &BadgeEngine,
    config: &Config,
    id: &BusinessId,
    json: bool,
) -> Result<String, SyncError> {
    let record = store
        .get(id)
        .ok_or_else(|| SyncError::UnknownBusiness(id.to_string()))?;
    let report = BadgeReport::from_record(engine, record);
    if json {
        return Ok(render_json(&report));
    }
    Ok(report.human_summary(RenderOptions::from(&config.display)))
}

pub fn render_overview(store: &ReputationStore, engine: &BadgeEngine, json: bool) -> String {
    let summary = StoreSummary::from_store(engine, store);
    if json {
        return render_summary_json(&summary);
    }

    let mut lines = vec![summary.human_summary()];
    let saved = store.tier_counts();
    lines.push("Saved badges:".to_string());
    for tier in BadgeTier::ALL.iter().rev() {
        let count = saved.get(tier).copied().unwrap_or(0);
        lines.push(format!("  {}: {count}", tier.display_name()));
    }
    for record in store.sorted_records() {
        let tier = engine.evaluate(&record.reputation()).tier;
        lines.push(format!("  {} -> {}", record.label(), tier.display_name()));
    }
    lines.join("\n")
}
