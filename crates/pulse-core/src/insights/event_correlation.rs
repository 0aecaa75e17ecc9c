//! Event Correlation Rule
//!
//! When high-impact events happened in the window and some metrics moved
//! noticeably, points out that the two may be related. This is a prompt for
//! investigation, not a causal claim.

use crate::models::Impact;

use super::engine::{join_ids, InsightContext, InsightRule};
use super::types::{Insight, InsightType};

const CONFIDENCE: f64 = 0.6;

pub struct EventCorrelationRule {
    /// `|percentage_change|` a metric needs to be considered affected (default 15%)
    min_change_percent: f64,
}

impl EventCorrelationRule {
    pub fn new(min_change_percent: f64) -> Self {
        Self { min_change_percent }
    }
}

impl Default for EventCorrelationRule {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl InsightRule for EventCorrelationRule {
    fn insight_type(&self) -> InsightType {
        InsightType::Info
    }

    fn name(&self) -> &'static str {
        "Event Correlation"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let events: Vec<_> = ctx
            .events
            .iter()
            .filter(|e| e.impact == Impact::High)
            .collect();
        if events.is_empty() {
            return vec![];
        }

        let metric_ids: Vec<String> = ctx
            .analyses
            .iter()
            .filter(|a| a.percentage_change.abs() > self.min_change_percent)
            .map(|a| a.metric_id.clone())
            .collect();
        if metric_ids.is_empty() {
            return vec![];
        }

        let event_ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();

        let insight = Insight::new(
            InsightType::Info,
            format!(
                "events:{}:{}",
                join_ids(event_ids.iter().map(String::as_str), ","),
                join_ids(metric_ids.iter().map(String::as_str), ",")
            ),
            format!(
                "{} High-Impact Events May Have Influenced Metrics",
                events.len()
            ),
            format!(
                "Events: {}. Affected metrics: {}",
                join_ids(events.iter().map(|e| e.name.as_str()), ", "),
                join_ids(metric_ids.iter().map(String::as_str), ", ")
            ),
            CONFIDENCE,
        )
        .with_recommendations(&[
            "Analyze event-metric correlations",
            "Document successful interventions",
            "Plan similar events for positive outcomes",
        ])
        .with_metrics(metric_ids)
        .with_events(event_ids);

        vec![insight]
    }
}
