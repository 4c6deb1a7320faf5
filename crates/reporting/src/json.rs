use crate::{BadgeReport, StoreSummary};

pub fn render_json(report: &BadgeReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

pub fn render_summary_json(summary: &StoreSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}
