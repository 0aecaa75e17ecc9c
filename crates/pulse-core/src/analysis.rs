//! Per-metric series analysis
//!
//! Turns raw observations into start/end values, change, trend, volatility and
//! anomaly flags for every metric in a window.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{DateWindow, MetricSeriesPoint};
use crate::stats::{self, Trend};

/// `|percentage_change|` above which a metric is anomalous regardless of its
/// individual values
pub const ANOMALOUS_CHANGE_PERCENT: f64 = 20.0;

/// Minimum observations needed to analyze a metric
pub const MIN_POINTS: usize = 2;

/// Analysis of one metric over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAnalysis {
    pub metric_id: String,
    pub start_value: f64,
    pub end_value: f64,
    pub absolute_change: f64,
    /// Percent change from start to end, rounded to 2 decimals
    pub percentage_change: f64,
    pub trend: Trend,
    /// Coefficient of variation in percent, rounded to 2 decimals
    pub volatility: f64,
    pub anomalies: Vec<f64>,
    pub is_anomalous: bool,
}

/// A metric that could not be analyzed because its records are malformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFailure {
    pub metric_id: String,
    pub reason: String,
}

/// Result of analyzing a batch of metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analyses: Vec<MetricAnalysis>,
    pub failures: Vec<MetricFailure>,
}

impl AnalysisReport {
    pub fn get(&self, metric_id: &str) -> Option<&MetricAnalysis> {
        self.analyses.iter().find(|a| a.metric_id == metric_id)
    }
}

/// Stateless metric analyzer
#[derive(Debug, Clone)]
pub struct MetricAnalyzer {
    trend_threshold_percent: f64,
    anomaly_std_devs: f64,
}

impl Default for MetricAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&AnalyticsConfig::default())
    }

    pub fn with_config(config: &AnalyticsConfig) -> Self {
        Self {
            trend_threshold_percent: config.trend_threshold_percent,
            anomaly_std_devs: config.anomaly_std_devs,
        }
    }

    /// Analyze every metric in `series` that has data inside `window`
    ///
    /// `series` may mix several metrics. Results follow the order in which each
    /// metric first appears. Metrics with fewer than [`MIN_POINTS`] observations
    /// are skipped; metrics with non-finite values are reported as failures
    /// without affecting the rest of the batch.
    pub fn analyze(&self, series: &[MetricSeriesPoint], window: &DateWindow) -> AnalysisReport {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<(usize, &MetricSeriesPoint)>> = HashMap::new();

        for (position, point) in series.iter().enumerate() {
            if !window.contains(point.date) {
                continue;
            }
            let id = point.metric_id.as_str();
            groups
                .entry(id)
                .or_insert_with(|| {
                    order.push(id);
                    Vec::new()
                })
                .push((position, point));
        }

        let mut report = AnalysisReport::default();

        for metric_id in order {
            let points = &groups[metric_id];

            if let Some((position, point)) = points.iter().find(|(_, p)| !p.value.is_finite()) {
                tracing::warn!(
                    metric = metric_id,
                    position,
                    value = point.value,
                    "Metric has a non-finite value, skipping"
                );
                report.failures.push(MetricFailure {
                    metric_id: metric_id.to_string(),
                    reason: format!(
                        "value {} at position {} ({}) is not a finite number",
                        point.value, position, point.date
                    ),
                });
                continue;
            }

            let points: Vec<&MetricSeriesPoint> = points.iter().map(|(_, p)| *p).collect();
            match self.analyze_sorted(metric_id, points) {
                Some(analysis) => report.analyses.push(analysis),
                None => tracing::debug!(
                    metric = metric_id,
                    "Not enough observations in window, skipping"
                ),
            }
        }

        tracing::debug!(
            analyzed = report.analyses.len(),
            failed = report.failures.len(),
            "Metric analysis complete"
        );

        report
    }

    /// Analyze a single metric's observations (any order, no window filter)
    ///
    /// Returns `None` with fewer than [`MIN_POINTS`] observations.
    pub fn analyze_metric(
        &self,
        metric_id: &str,
        points: &[MetricSeriesPoint],
    ) -> Option<MetricAnalysis> {
        self.analyze_sorted(metric_id, points.iter().collect())
    }

    fn analyze_sorted(
        &self,
        metric_id: &str,
        mut points: Vec<&MetricSeriesPoint>,
    ) -> Option<MetricAnalysis> {
        if points.len() < MIN_POINTS {
            return None;
        }

        // Stable: equal dates keep input order
        points.sort_by_key(|p| p.date);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();

        let start_value = values[0];
        let end_value = values[values.len() - 1];
        let percentage_change = stats::round(stats::percentage_change(start_value, end_value), 2);
        let anomalies = self.find_anomalies(&values);

        Some(MetricAnalysis {
            metric_id: metric_id.to_string(),
            start_value,
            end_value,
            absolute_change: end_value - start_value,
            percentage_change,
            trend: stats::classify_trend_with_threshold(&values, self.trend_threshold_percent),
            volatility: volatility(&values),
            is_anomalous: percentage_change.abs() > ANOMALOUS_CHANGE_PERCENT
                || !anomalies.is_empty(),
            anomalies,
        })
    }

    /// Global z-score detection, falling back to the median/MAD score when the
    /// series is too short for a z-score to ever reach the threshold
    fn find_anomalies(&self, values: &[f64]) -> Vec<f64> {
        let max_z = ((values.len() - 1) as f64).sqrt();
        if max_z > self.anomaly_std_devs {
            stats::detect_anomalies(values, self.anomaly_std_devs)
        } else {
            stats::detect_anomalies_robust(values, self.anomaly_std_devs)
        }
    }
}

/// Coefficient of variation as a percent, rounded to 2 decimals (`0` for a
/// zero mean)
pub fn volatility(values: &[f64]) -> f64 {
    let mean = stats::average(values);
    if mean == 0.0 {
        return 0.0;
    }
    stats::round(stats::standard_deviation(values) / mean.abs() * 100.0, 2)
}
