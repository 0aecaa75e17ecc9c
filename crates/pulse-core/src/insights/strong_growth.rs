//! Strong Growth Rule
//!
//! Highlights metrics that are trending up by more than the growth threshold.

use crate::stats::Trend;

use super::engine::{join_ids, InsightContext, InsightRule};
use super::types::{Insight, InsightType};

const CONFIDENCE: f64 = 0.8;

pub struct StrongGrowthRule {
    /// Minimum percentage change for an increasing metric (default 10%)
    min_growth_percent: f64,
}

impl StrongGrowthRule {
    pub fn new(min_growth_percent: f64) -> Self {
        Self { min_growth_percent }
    }
}

impl Default for StrongGrowthRule {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl InsightRule for StrongGrowthRule {
    fn insight_type(&self) -> InsightType {
        InsightType::Positive
    }

    fn name(&self) -> &'static str {
        "Strong Growth"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let metric_ids: Vec<String> = ctx
            .analyses
            .iter()
            .filter(|a| {
                a.trend == Trend::Increasing && a.percentage_change > self.min_growth_percent
            })
            .map(|a| a.metric_id.clone())
            .collect();

        if metric_ids.is_empty() {
            return vec![];
        }

        let insight = Insight::new(
            InsightType::Positive,
            format!("growth:{}", join_ids(metric_ids.iter().map(String::as_str), ",")),
            format!("Strong Growth in {} Metrics", metric_ids.len()),
            format!(
                "Positive trends detected in: {}",
                join_ids(metric_ids.iter().map(String::as_str), ", ")
            ),
            CONFIDENCE,
        )
        .with_recommendations(&[
            "Analyze success factors",
            "Scale successful initiatives",
            "Document best practices",
        ])
        .with_metrics(metric_ids);

        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricAnalysis;

    fn analysis(metric_id: &str, pct: f64, trend: Trend) -> MetricAnalysis {
        MetricAnalysis {
            metric_id: metric_id.to_string(),
            start_value: 100.0,
            end_value: 100.0 + pct,
            absolute_change: pct,
            percentage_change: pct,
            trend,
            volatility: 0.0,
            anomalies: vec![],
            is_anomalous: false,
        }
    }

    #[test]
    fn test_requires_increasing_trend_and_growth() {
        let analyses = vec![
            analysis("revenue", 50.0, Trend::Increasing),
            analysis("signups", 8.0, Trend::Increasing),
            analysis("churn", -20.0, Trend::Decreasing),
        ];
        let insights = StrongGrowthRule::default().evaluate(&InsightContext::new(&analyses, &[]));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::Positive);
        assert_eq!(insights[0].confidence, 0.8);
        assert_eq!(insights[0].metric_ids, vec!["revenue"]);
        assert_eq!(insights[0].description, "Positive trends detected in: revenue");
    }

    #[test]
    fn test_no_growth_no_insight() {
        let analyses = vec![analysis("nps", 2.0, Trend::Stable)];
        assert!(StrongGrowthRule::default()
            .evaluate(&InsightContext::new(&analyses, &[]))
            .is_empty());
    }
}
