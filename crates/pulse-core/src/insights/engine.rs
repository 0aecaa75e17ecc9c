//! Insight Engine - runs the registered rules and ranks their output

use crate::analysis::MetricAnalysis;
use crate::config::{AnalyticsConfig, InsightThresholds};
use crate::models::BusinessEvent;

use super::types::{Insight, InsightType};
use super::{CriticalChangeRule, EventCorrelationRule, StrongGrowthRule, VolatilityRule};

/// Input shared by every rule
pub struct InsightContext<'a> {
    /// Metric analyses for the requested window
    pub analyses: &'a [MetricAnalysis],
    /// Events relevant to the same window
    pub events: &'a [BusinessEvent],
}

impl<'a> InsightContext<'a> {
    pub fn new(analyses: &'a [MetricAnalysis], events: &'a [BusinessEvent]) -> Self {
        Self { analyses, events }
    }
}

/// A rule that scans analyses/events and emits zero or more insights
pub trait InsightRule: Send + Sync {
    /// Type of insight this rule produces
    fn insight_type(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight>;
}

/// The main insight engine
///
/// Every rule runs against the same input regardless of what earlier rules
/// produced. Output is sorted by descending confidence; ties keep registration
/// order.
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    max_results: Option<usize>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules and default thresholds
    pub fn new() -> Self {
        Self::with_thresholds(&InsightThresholds::default(), None)
    }

    pub fn with_config(config: &AnalyticsConfig) -> Self {
        Self::with_thresholds(&config.insights, config.max_insights)
    }

    /// Create an engine with the built-in rules
    pub fn with_thresholds(thresholds: &InsightThresholds, max_results: Option<usize>) -> Self {
        let mut engine = Self {
            rules: vec![],
            max_results,
        };

        // Registration order is the tie-break order
        engine.register(Box::new(CriticalChangeRule::new(
            thresholds.critical_change_percent,
        )));
        engine.register(Box::new(StrongGrowthRule::new(thresholds.growth_percent)));
        engine.register(Box::new(VolatilityRule::new(thresholds.volatility_percent)));
        engine.register(Box::new(EventCorrelationRule::new(
            thresholds.event_change_percent,
        )));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self {
            rules: vec![],
            max_results: None,
        }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Run all rules and return ranked insights
    pub fn generate(&self, analyses: &[MetricAnalysis], events: &[BusinessEvent]) -> Vec<Insight> {
        let ctx = InsightContext::new(analyses, events);
        let mut insights = vec![];

        for rule in &self.rules {
            let produced = rule.evaluate(&ctx);
            tracing::debug!(
                rule = rule.name(),
                insight_type = rule.insight_type().as_str(),
                count = produced.len(),
                "Insight rule evaluated"
            );
            insights.extend(produced);
        }

        // Stable sort: equal confidence keeps rule order
        insights.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        if let Some(max) = self.max_results {
            insights.truncate(max);
        }

        tracing::info!(
            analyses = analyses.len(),
            events = events.len(),
            insights = insights.len(),
            "Insight generation complete"
        );

        insights
    }

    /// Get list of registered rule types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.rules.iter().map(|r| r.insight_type()).collect()
    }
}

/// Join contributor ids for keys and descriptions
pub(crate) fn join_ids<'a>(ids: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    ids.into_iter().collect::<Vec<_>>().join(sep)
}
