//! What-if scenario projection
//!
//! Projects each metric's next value either from an explicit percent assumption
//! or by continuing its current trend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::MetricAnalysis;
use crate::stats::{self, Trend};

/// Floor for scenario confidence
pub const MIN_CONFIDENCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub scenario_name: String,
    /// Percent change assumed per metric
    pub assumptions: BTreeMap<String, f64>,
    pub projected_values: BTreeMap<String, f64>,
    /// `[0.1, 1]`, lower when the underlying metrics are volatile
    pub confidence: f64,
}

/// Multiplier applied when a metric has no explicit assumption
pub fn trend_multiplier(trend: Trend) -> f64 {
    match trend {
        Trend::Increasing => 1.05,
        Trend::Decreasing => 0.95,
        Trend::Stable => 1.0,
    }
}

/// Build a scenario from current analyses
///
/// Assumptions for metrics without an analysis are kept in the scenario but
/// produce no projection.
pub fn project(
    scenario_name: impl Into<String>,
    assumptions: BTreeMap<String, f64>,
    analyses: &[MetricAnalysis],
) -> WhatIfScenario {
    let projected_values = analyses
        .iter()
        .map(|analysis| {
            let multiplier = match assumptions.get(&analysis.metric_id) {
                Some(percent) => 1.0 + percent / 100.0,
                None => trend_multiplier(analysis.trend),
            };
            (analysis.metric_id.clone(), analysis.end_value * multiplier)
        })
        .collect();

    let volatilities: Vec<f64> = analyses.iter().map(|a| a.volatility).collect();
    let confidence = (1.0 - stats::average(&volatilities) / 100.0).max(MIN_CONFIDENCE);

    WhatIfScenario {
        scenario_name: scenario_name.into(),
        assumptions,
        projected_values,
        confidence: stats::round(confidence, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn analysis(metric_id: &str, end_value: f64, trend: Trend, volatility: f64) -> MetricAnalysis {
        MetricAnalysis {
            metric_id: metric_id.to_string(),
            start_value: end_value,
            end_value,
            absolute_change: 0.0,
            percentage_change: 0.0,
            trend,
            volatility,
            anomalies: vec![],
            is_anomalous: false,
        }
    }

    #[test]
    fn test_explicit_assumption_wins_over_trend() {
        let analyses = vec![analysis("revenue", 200.0, Trend::Decreasing, 10.0)];
        let assumptions = BTreeMap::from([("revenue".to_string(), 10.0)]);

        let scenario = project("Price increase", assumptions, &analyses);
        assert_relative_eq!(scenario.projected_values["revenue"], 220.0, epsilon = 1e-9);
        assert_eq!(scenario.scenario_name, "Price increase");
    }

    #[test]
    fn test_trend_continuation() {
        let analyses = vec![
            analysis("revenue", 100.0, Trend::Increasing, 0.0),
            analysis("churn", 100.0, Trend::Decreasing, 0.0),
            analysis("nps", 100.0, Trend::Stable, 0.0),
        ];

        let scenario = project("Baseline", BTreeMap::new(), &analyses);
        assert_relative_eq!(scenario.projected_values["revenue"], 105.0, epsilon = 1e-9);
        assert_relative_eq!(scenario.projected_values["churn"], 95.0, epsilon = 1e-9);
        assert_eq!(scenario.projected_values["nps"], 100.0);
        assert_eq!(scenario.confidence, 1.0);
    }

    #[test]
    fn test_confidence_from_volatility() {
        let analyses = vec![
            analysis("revenue", 100.0, Trend::Stable, 20.0),
            analysis("churn", 100.0, Trend::Stable, 30.0),
        ];
        assert_eq!(project("s", BTreeMap::new(), &analyses).confidence, 0.75);

        let volatile = vec![analysis("crypto", 100.0, Trend::Stable, 180.0)];
        assert_eq!(project("s", BTreeMap::new(), &volatile).confidence, 0.1);
    }

    #[test]
    fn test_assumption_for_unknown_metric_is_kept() {
        let assumptions = BTreeMap::from([("ghost".to_string(), 50.0)]);
        let scenario = project("s", assumptions, &[]);
        assert!(scenario.projected_values.is_empty());
        assert_eq!(scenario.assumptions["ghost"], 50.0);
        assert_eq!(scenario.confidence, 1.0);
    }
}
