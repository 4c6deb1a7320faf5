use anyhow::{Context, Result};

use badge_engine::{classify as classify_tier, next_tier as project_next_tier};
use sync_core::badge::BadgeTier;
use sync_core::reputation::{clamp_count, clamp_percentage};

pub fn classify(count: i64, percentage: f64) -> Result<()> {
    let tier = classify_tier(clamp_count(count), clamp_percentage(percentage));
    println!("{} ({})", tier, tier.display_name());
    Ok(())
}

pub fn next_tier(
    count: i64,
    percentage: f64,
    current: Option<BadgeTier>,
    json: bool,
) -> Result<()> {
    let count = clamp_count(count);
    let percentage = clamp_percentage(percentage);
    let projection = project_next_tier(current, count, percentage);

    if json {
        let output =
            serde_json::to_string_pretty(&projection).context("render projection JSON")?;
        println!("{}", output);
        return Ok(());
    }

    match projection {
        Some(projection) => {
            let tier = classify_tier(count, percentage);
            println!(
                "{}",
                reporting::projection_copy(tier, count, percentage, &projection)
            );
        }
        None => println!("Top badge reached."),
    }
    Ok(())
}
