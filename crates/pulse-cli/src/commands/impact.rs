//! Event impact command

use std::path::Path;

use anyhow::Result;
use pulse_core::impact::{event_windows, MAX_WINDOW_DAYS};
use pulse_core::{estimate_impact_ratios, AnalyticsConfig, Error};

use super::{load_events, load_values, metric_ids, truncate, Output};

pub fn cmd_impact(
    config: &AnalyticsConfig,
    values: &Path,
    events: &Path,
    event_id: &str,
    metrics: &[String],
    window_days: Option<i64>,
    output: Output,
) -> Result<()> {
    let window_days = window_days.unwrap_or(config.impact_window_days);
    if window_days <= 0 || window_days > MAX_WINDOW_DAYS {
        anyhow::bail!(
            "--window-days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS,
            window_days
        );
    }

    let series = load_values(values)?;
    let events = load_events(events)?;
    let event = events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| Error::NotFound(format!("event {}", event_id)))?;

    let ids = if metrics.is_empty() {
        metric_ids(&series)
    } else {
        metrics.to_vec()
    };
    let ratios = estimate_impact_ratios(&series, event, &ids, window_days);

    if output.is_json() {
        return output.print_json(&ratios);
    }

    let (before, after) = event_windows(event, window_days);

    println!();
    println!("🎯 Event Impact: {} ({})", event.name, event.id);
    println!("   {} / {} impact", event.category, event.impact);
    println!("   Before: {}", before);
    println!("   After:  {}", after);
    println!("   ─────────────────────────────────────────────────────────────");

    for id in &ids {
        match ratios.get(id) {
            Some(ratio) => println!("   {:20} │ {:>+8.2}%", truncate(id, 20), ratio * 100.0),
            None => println!(
                "   {:20} │ \x1b[2minsufficient data\x1b[0m",
                truncate(id, 20)
            ),
        }
    }

    println!();
    println!("   Impact ratios compare averages and do not imply causation.");

    Ok(())
}
