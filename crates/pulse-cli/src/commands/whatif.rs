//! What-if projection command

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use pulse_core::{project, AnalyticsConfig, DateWindow, MetricAnalyzer};
use tracing::warn;

use super::{load_values, select_metrics, truncate, warn_failures, Output};

pub fn cmd_whatif(
    config: &AnalyticsConfig,
    values: &Path,
    name: &str,
    assumptions: BTreeMap<String, f64>,
    metrics: &[String],
    window: &DateWindow,
    output: Output,
) -> Result<()> {
    let series = select_metrics(load_values(values)?, metrics);
    let report = MetricAnalyzer::with_config(config).analyze(&series, window);
    warn_failures(&report);

    for metric in assumptions.keys() {
        if report.get(metric).is_none() {
            warn!(metric = metric.as_str(), "Assumption has no analyzed metric to project");
        }
    }

    let scenario = project(name, assumptions, &report.analyses);

    if output.is_json() {
        return output.print_json(&scenario);
    }

    println!();
    println!("🔮 What-If: {}", scenario.scenario_name);
    println!("   Window: {}", window);
    println!("   Confidence: {:.0}%", scenario.confidence * 100.0);
    println!("   ─────────────────────────────────────────────────────────────");

    if scenario.projected_values.is_empty() {
        println!("   No metrics with at least 2 values in this window.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>12} │ {:10}",
        "Metric", "Current", "Projected", "Basis"
    );
    println!("   ─────────────────────┼────────────┼──────────────┼───────────");

    for a in &report.analyses {
        let Some(projected) = scenario.projected_values.get(&a.metric_id) else {
            continue;
        };
        let basis = match scenario.assumptions.get(&a.metric_id) {
            Some(pct) => format!("{:+.1}%", pct),
            None => format!("{} trend", a.trend),
        };
        println!(
            "   {:20} │ {:>10.2} │ {:>12.2} │ {:10}",
            truncate(&a.metric_id, 20),
            a.end_value,
            projected,
            basis
        );
    }

    Ok(())
}
