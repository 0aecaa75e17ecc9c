//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of insight, as rendered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Large change that needs investigation
    Critical,
    /// Healthy growth worth scaling
    Positive,
    /// Unstable behaviour worth watching
    Warning,
    /// Context linking metrics and events
    Info,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Critical => "critical",
            InsightType::Positive => "positive",
            InsightType::Warning => "warning",
            InsightType::Info => "info",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(InsightType::Critical),
            "positive" => Ok(InsightType::Positive),
            "warning" => Ok(InsightType::Warning),
            "info" => Ok(InsightType::Info),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Display bucket derived from an insight's confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// `>= 0.8` high, `>= 0.6` medium, otherwise low
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Priority::High
        } else if confidence >= 0.6 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked, human-readable statement about the analyzed metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Stable key for deduplication (e.g., "critical:revenue,churn")
    pub key: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Always derived from `confidence`
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub recommendations: Vec<String>,
    /// In `[0, 1]`
    pub confidence: f64,
    /// Contributing metrics, in the order encountered
    pub metric_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_ids: Option<Vec<String>>,
}

impl Insight {
    /// Create an insight; confidence is clamped to `[0, 1]`
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        Self {
            key: key.into(),
            insight_type,
            priority: Priority::from_confidence(confidence),
            title: title.into(),
            description: description.into(),
            recommendations: Vec::new(),
            confidence,
            metric_ids: Vec::new(),
            event_ids: None,
        }
    }

    pub fn with_recommendations(mut self, recommendations: &[&str]) -> Self {
        self.recommendations = recommendations.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_metrics(mut self, metric_ids: Vec<String>) -> Self {
        self.metric_ids = metric_ids;
        self
    }

    pub fn with_events(mut self, event_ids: Vec<String>) -> Self {
        self.event_ids = Some(event_ids);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_type_serialization() {
        assert_eq!(InsightType::Critical.as_str(), "critical");
        assert_eq!(
            InsightType::from_str("warning").unwrap(),
            InsightType::Warning
        );
        assert!(InsightType::from_str("negative").is_err());
    }

    #[test]
    fn test_priority_from_confidence() {
        assert_eq!(Priority::from_confidence(0.9), Priority::High);
        assert_eq!(Priority::from_confidence(0.8), Priority::High);
        assert_eq!(Priority::from_confidence(0.7), Priority::Medium);
        assert_eq!(Priority::from_confidence(0.6), Priority::Medium);
        assert_eq!(Priority::from_confidence(0.3), Priority::Low);
    }

    #[test]
    fn test_insight_builder() {
        let insight = Insight::new(
            InsightType::Warning,
            "volatility:revenue",
            "High Volatility in 1 Metrics",
            "Unstable patterns detected in: revenue",
            1.4,
        )
        .with_recommendations(&["Identify volatility sources"])
        .with_metrics(vec!["revenue".to_string()]);

        assert_eq!(insight.confidence, 1.0);
        assert_eq!(insight.priority, Priority::High);
        assert_eq!(insight.recommendations.len(), 1);
        assert!(insight.event_ids.is_none());
    }

    #[test]
    fn test_insight_json_shape() {
        let insight = Insight::new(InsightType::Info, "k", "t", "d", 0.6)
            .with_events(vec!["evt-1".to_string()]);
        let json = serde_json::to_value(&insight).unwrap();

        assert_eq!(json["type"], "info");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["eventIds"][0], "evt-1");
        assert!(json.get("metricIds").is_some());
    }
}
