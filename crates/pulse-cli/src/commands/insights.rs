//! Insight generation command

use std::path::Path;

use anyhow::Result;
use pulse_core::{AnalyticsConfig, DateWindow, InsightEngine, InsightType, MetricAnalyzer};
use tracing::debug;

use super::{load_events, load_values, select_metrics, warn_failures, Output};

pub fn cmd_insights(
    config: &AnalyticsConfig,
    values: &Path,
    events: Option<&Path>,
    metrics: &[String],
    window: &DateWindow,
    output: Output,
) -> Result<()> {
    let series = select_metrics(load_values(values)?, metrics);
    let report = MetricAnalyzer::with_config(config).analyze(&series, window);
    warn_failures(&report);

    let events = match events {
        Some(path) => load_events(path)?,
        None => vec![],
    };
    let total_events = events.len();
    let events: Vec<_> = events.into_iter().filter(|e| e.overlaps(window)).collect();
    debug!(
        total = total_events,
        in_window = events.len(),
        "Filtered events to analysis window"
    );

    let insights = InsightEngine::with_config(config).generate(&report.analyses, &events);

    if output.is_json() {
        return output.print_json(&insights);
    }

    println!();
    println!("💡 Insights");
    println!("   Window: {}", window);
    println!(
        "   {} metrics analyzed, {} events in window",
        report.analyses.len(),
        events.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing notable in this window.");
        return Ok(());
    }

    for insight in &insights {
        let icon = match insight.insight_type {
            InsightType::Critical => "🔴",
            InsightType::Positive => "🟢",
            InsightType::Warning => "🟡",
            InsightType::Info => "🔵",
        };
        println!();
        println!(
            "   {} {} ({} priority, {:.0}% confidence)",
            icon,
            insight.title,
            insight.priority,
            insight.confidence * 100.0
        );
        println!("      {}", insight.description);
        for rec in &insight.recommendations {
            println!("      • {}", rec);
        }
    }

    Ok(())
}
