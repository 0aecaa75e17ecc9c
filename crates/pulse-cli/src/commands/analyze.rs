//! Metric analysis command

use std::path::Path;

use anyhow::Result;
use pulse_core::{AnalyticsConfig, DateWindow, MetricAnalyzer};

use super::{load_values, select_metrics, truncate, Output};

pub fn cmd_analyze(
    config: &AnalyticsConfig,
    values: &Path,
    metrics: &[String],
    window: &DateWindow,
    output: Output,
) -> Result<()> {
    let series = select_metrics(load_values(values)?, metrics);
    let report = MetricAnalyzer::with_config(config).analyze(&series, window);

    if output.is_json() {
        return output.print_json(&report);
    }

    println!();
    println!("📊 Metric Analysis");
    println!("   Window: {}", window);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.analyses.is_empty() && report.failures.is_empty() {
        println!("   No metrics with at least 2 values in this window.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>8} │ {:10} │ {:>7}",
        "Metric", "Start", "End", "Change", "Trend", "Vol."
    );
    println!("   ─────────────────────┼────────────┼────────────┼──────────┼────────────┼────────");

    for a in &report.analyses {
        let flag = if a.is_anomalous { " ⚠" } else { "" };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>7.2}% │ {:10} │ {:>6.2}%{}",
            truncate(&a.metric_id, 20),
            a.start_value,
            a.end_value,
            a.percentage_change,
            a.trend.as_str(),
            a.volatility,
            flag
        );
    }

    let with_anomalies: Vec<_> = report
        .analyses
        .iter()
        .filter(|a| !a.anomalies.is_empty())
        .collect();
    if !with_anomalies.is_empty() {
        println!();
        println!("   Anomalous values:");
        for a in with_anomalies {
            let values: Vec<String> = a.anomalies.iter().map(|v| format!("{:.2}", v)).collect();
            println!("     {}: {}", a.metric_id, values.join(", "));
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("   Skipped:");
        for failure in &report.failures {
            println!("     {}: {}", failure.metric_id, failure.reason);
        }
    }

    Ok(())
}
