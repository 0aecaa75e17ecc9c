//! Volatility Rule
//!
//! Warns about metrics whose coefficient of variation exceeds the threshold.

use super::engine::{join_ids, InsightContext, InsightRule};
use super::types::{Insight, InsightType};

const CONFIDENCE: f64 = 0.7;

pub struct VolatilityRule {
    /// Volatility (percent) that must be exceeded (default 15%)
    max_volatility_percent: f64,
}

impl VolatilityRule {
    pub fn new(max_volatility_percent: f64) -> Self {
        Self {
            max_volatility_percent,
        }
    }
}

impl Default for VolatilityRule {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl InsightRule for VolatilityRule {
    fn insight_type(&self) -> InsightType {
        InsightType::Warning
    }

    fn name(&self) -> &'static str {
        "Volatility"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let volatile: Vec<(&str, f64)> = ctx
            .analyses
            .iter()
            .filter(|a| a.volatility > self.max_volatility_percent)
            .map(|a| (a.metric_id.as_str(), a.volatility))
            .collect();

        if volatile.is_empty() {
            return vec![];
        }

        let details = volatile
            .iter()
            .map(|(id, v)| format!("{} ({:.1}%)", id, v))
            .collect::<Vec<_>>()
            .join(", ");

        let insight = Insight::new(
            InsightType::Warning,
            format!("volatility:{}", join_ids(volatile.iter().map(|(id, _)| *id), ",")),
            format!("High Volatility in {} Metrics", volatile.len()),
            format!("Unstable patterns detected in: {}", details),
            CONFIDENCE,
        )
        .with_recommendations(&[
            "Stabilize underlying processes",
            "Identify volatility sources",
            "Implement monitoring controls",
        ])
        .with_metrics(volatile.iter().map(|(id, _)| id.to_string()).collect());

        vec![insight]
    }
}
