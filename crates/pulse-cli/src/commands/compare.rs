//! Period comparison command

use std::path::Path;

use anyhow::Result;
use pulse_core::{AnalyticsConfig, DateWindow, PeriodComparator, ZeroValuePolicy};

use super::{load_values, truncate, Output};

pub fn cmd_compare(
    config: &AnalyticsConfig,
    values: &Path,
    metrics: &[String],
    period1: &DateWindow,
    period2: &DateWindow,
    exclude_zero: bool,
    output: Output,
) -> Result<()> {
    let series = load_values(values)?;
    let policy = if exclude_zero {
        ZeroValuePolicy::Exclude
    } else {
        config.zero_values
    };
    let results = PeriodComparator::new(policy).compare_many(&series, metrics, period1, period2);

    if output.is_json() {
        return output.print_json(&results);
    }

    println!();
    println!("⚖️  Period Comparison");
    println!("   Period 1: {}", period1);
    println!("   Period 2: {}", period2);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>10} │ {:>8} │ {:6}",
        "Metric", "Period 1", "Period 2", "Change", "%", "Signif."
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────────┼──────────┼───────");

    for r in &results {
        let c = &r.comparison;
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>+10.2} │ {:>+7.2}% │ {:6}",
            truncate(&r.metric_id, 20),
            c.period1_avg,
            c.period2_avg,
            c.change,
            c.change_percent,
            c.significance.as_str()
        );
    }

    Ok(())
}
