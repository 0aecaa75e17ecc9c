//! Pulse Core Library
//!
//! Statistical analytics for business metrics:
//! - Numeric toolkit (change, averages, dispersion, correlation, anomalies)
//! - Per-metric analysis over a date window
//! - Rule-based insight engine
//! - Period-over-period comparison
//! - Event impact ratios and what-if projections
//! - CSV import and TOML configuration

pub mod analysis;
pub mod comparison;
pub mod config;
pub mod error;
pub mod impact;
pub mod import;
pub mod insights;
pub mod models;
pub mod projection;
pub mod stats;

pub use analysis::{AnalysisReport, MetricAnalysis, MetricAnalyzer, MetricFailure};
pub use comparison::{
    MetricComparison, PeriodComparator, PeriodComparison, Significance, ZeroValuePolicy,
};
pub use config::{AnalyticsConfig, InsightThresholds};
pub use error::{Error, Result};
pub use impact::{estimate_impact_ratio, estimate_impact_ratios};
pub use import::{parse_events, parse_metric_values};
pub use insights::{Insight, InsightEngine, InsightRule, InsightType, Priority};
pub use models::{BusinessEvent, DateWindow, EventCategory, Impact, MetricSeriesPoint, Period};
pub use projection::{project, WhatIfScenario};
pub use stats::Trend;
