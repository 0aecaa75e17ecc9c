//! Critical Change Rule
//!
//! Flags metrics whose start-to-end change exceeds the critical threshold in
//! either direction. All matching metrics are reported in one insight.

use super::engine::{join_ids, InsightContext, InsightRule};
use super::types::{Insight, InsightType};

const CONFIDENCE: f64 = 0.9;

pub struct CriticalChangeRule {
    /// `|percentage_change|` that must be exceeded (default 30%)
    threshold_percent: f64,
}

impl CriticalChangeRule {
    pub fn new(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }
}

impl Default for CriticalChangeRule {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl InsightRule for CriticalChangeRule {
    fn insight_type(&self) -> InsightType {
        InsightType::Critical
    }

    fn name(&self) -> &'static str {
        "Critical Change"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let metric_ids: Vec<String> = ctx
            .analyses
            .iter()
            .filter(|a| a.percentage_change.abs() > self.threshold_percent)
            .map(|a| a.metric_id.clone())
            .collect();

        if metric_ids.is_empty() {
            return vec![];
        }

        let names = join_ids(metric_ids.iter().map(String::as_str), ", ");
        let insight = Insight::new(
            InsightType::Critical,
            format!("critical:{}", join_ids(metric_ids.iter().map(String::as_str), ",")),
            format!("Critical Changes Detected in {} Metrics", metric_ids.len()),
            format!(
                "Significant changes (>{:.0}%) detected in: {}",
                self.threshold_percent, names
            ),
            CONFIDENCE,
        )
        .with_recommendations(&[
            "Investigate root causes immediately",
            "Review recent events and changes",
            "Consider corrective actions",
        ])
        .with_metrics(metric_ids);

        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricAnalysis;
    use crate::stats::Trend;

    fn analysis(metric_id: &str, pct: f64) -> MetricAnalysis {
        MetricAnalysis {
            metric_id: metric_id.to_string(),
            start_value: 100.0,
            end_value: 100.0 + pct,
            absolute_change: pct,
            percentage_change: pct,
            trend: Trend::Stable,
            volatility: 0.0,
            anomalies: vec![],
            is_anomalous: false,
        }
    }

    #[test]
    fn test_flags_large_changes_in_both_directions() {
        let analyses = vec![
            analysis("revenue", 50.0),
            analysis("signups", 12.0),
            analysis("churn", -45.0),
        ];
        let insights = CriticalChangeRule::default().evaluate(&InsightContext::new(&analyses, &[]));

        assert_eq!(insights.len(), 1);
        let insight = &insights[0];
        assert_eq!(insight.insight_type, InsightType::Critical);
        assert_eq!(insight.confidence, 0.9);
        assert_eq!(insight.metric_ids, vec!["revenue", "churn"]);
        assert_eq!(insight.key, "critical:revenue,churn");
        assert_eq!(insight.title, "Critical Changes Detected in 2 Metrics");
        assert_eq!(insight.recommendations.len(), 3);
        assert!(insight.event_ids.is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let analyses = vec![analysis("revenue", 30.0)];
        assert!(CriticalChangeRule::default()
            .evaluate(&InsightContext::new(&analyses, &[]))
            .is_empty());
    }
}
