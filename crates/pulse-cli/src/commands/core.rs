//! Shared command utilities and the `config` command

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use pulse_core::config::default_config_path;
use pulse_core::{
    parse_events, parse_metric_values, AnalysisReport, AnalyticsConfig, BusinessEvent,
    DateWindow, MetricSeriesPoint, Period,
};
use tracing::{debug, info, warn};

use super::Output;
use crate::cli::WindowArgs;

/// Load analytics config, honoring `--config`
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

/// Load metric observations from a CSV file
pub fn load_values(path: &Path) -> Result<Vec<MetricSeriesPoint>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let points = parse_metric_values(file)
        .with_context(|| format!("Failed to import metric values from {}", path.display()))?;

    info!("Loaded {} metric values from {}", points.len(), path.display());
    Ok(points)
}

/// Load business events from a CSV file
pub fn load_events(path: &Path) -> Result<Vec<BusinessEvent>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let events = parse_events(file)
        .with_context(|| format!("Failed to import events from {}", path.display()))?;

    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid --{} date {:?} (use YYYY-MM-DD)", flag, value))
}

/// Build a window from explicit start/end arguments
pub fn parse_window(from: &str, to: &str) -> Result<DateWindow> {
    let start = parse_date_arg(from, "from")?;
    let end = parse_date_arg(to, "to")?;
    Ok(DateWindow::new(start, end)?)
}

/// Resolve window flags: explicit dates win over `--period`
pub fn resolve_window(args: &WindowArgs) -> Result<DateWindow> {
    resolve_window_at(args, Utc::now().date_naive())
}

pub fn resolve_window_at(args: &WindowArgs, today: NaiveDate) -> Result<DateWindow> {
    if let (Some(from), Some(to)) = (args.from.as_deref(), args.to.as_deref()) {
        return parse_window(from, to);
    }

    let period: Period = args.period.parse().map_err(|e: String| anyhow!(e))?;
    let window = period.window_ending(today);
    debug!(period = period.as_str(), %window, "Resolved analysis window");
    Ok(window)
}

/// Parse `METRIC=PERCENT` assumptions
///
/// A later assumption for the same metric replaces an earlier one.
pub fn parse_assumptions(raw: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut assumptions = BTreeMap::new();

    for item in raw {
        let Some((metric, percent)) = item.split_once('=') else {
            bail!("Invalid assumption {:?} (use METRIC=PERCENT, e.g. revenue=10)", item);
        };
        let metric = metric.trim();
        if metric.is_empty() {
            bail!("Invalid assumption {:?}: missing metric id", item);
        }
        let percent: f64 = percent
            .trim()
            .trim_end_matches('%')
            .parse()
            .with_context(|| format!("Invalid percent in assumption {:?}", item))?;
        if !percent.is_finite() {
            bail!("Invalid percent in assumption {:?}", item);
        }
        assumptions.insert(metric.to_string(), percent);
    }

    Ok(assumptions)
}

/// Keep only observations of `metrics` (all observations when empty)
pub fn select_metrics(
    series: Vec<MetricSeriesPoint>,
    metrics: &[String],
) -> Vec<MetricSeriesPoint> {
    if metrics.is_empty() {
        return series;
    }

    for metric in metrics {
        if !series.iter().any(|p| &p.metric_id == metric) {
            warn!(metric = metric.as_str(), "No values found for metric");
        }
    }

    series
        .into_iter()
        .filter(|p| metrics.contains(&p.metric_id))
        .collect()
}

/// Log each metric the analyzer had to skip, returning how many there were
pub fn warn_failures(report: &AnalysisReport) -> usize {
    for failure in &report.failures {
        warn!(
            metric = failure.metric_id.as_str(),
            reason = failure.reason.as_str(),
            "Metric excluded from results"
        );
    }
    report.failures.len()
}

/// Distinct metric ids in first-appearance order
pub fn metric_ids(series: &[MetricSeriesPoint]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for point in series {
        if !ids.contains(&point.metric_id) {
            ids.push(point.metric_id.clone());
        }
    }
    ids
}

/// Show the effective analytics configuration
pub fn cmd_config(config: &AnalyticsConfig, explicit: Option<&Path>, output: Output) -> Result<()> {
    if output.is_json() {
        return output.print_json(config);
    }

    let source = match explicit {
        Some(path) if path.exists() => path.display().to_string(),
        _ => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        },
    };

    println!();
    println!("⚙️  Analytics Config");
    println!("   Source: {}", source);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Trend threshold:        {:.1}%", config.trend_threshold_percent);
    println!("   Anomaly threshold:      {:.1} std devs", config.anomaly_std_devs);
    println!("   Zero values:            {:?}", config.zero_values);
    println!("   Impact window:          {} days", config.impact_window_days);
    println!();
    println!("   Insight thresholds:");
    println!(
        "     Critical change:      {:.1}%",
        config.insights.critical_change_percent
    );
    println!("     Strong growth:        {:.1}%", config.insights.growth_percent);
    println!("     Volatility:           {:.1}%", config.insights.volatility_percent);
    println!(
        "     Event correlation:    {:.1}%",
        config.insights.event_change_percent
    );
    match config.max_insights {
        Some(max) => println!("     Max results:          {}", max),
        None => println!("     Max results:          unlimited"),
    }

    Ok(())
}
