//! Analytics configuration
//!
//! Thresholds used by the analyzer, comparator, impact estimator and insight
//! rules. Config is loaded with a two-layer resolution:
//! 1. Override file (explicit path, or `<data dir>/pulse/config/analytics.toml`)
//! 2. Embedded defaults (compiled into the binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::comparison::ZeroValuePolicy;
use crate::error::{Error, Result};
use crate::impact::MAX_WINDOW_DAYS;
use crate::stats::{DEFAULT_ANOMALY_STD_DEVS, TREND_THRESHOLD_PERCENT};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Thresholds for the insight rules (percent values)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightThresholds {
    /// `|percentage_change|` above which a metric is a critical change
    pub critical_change_percent: f64,
    /// Minimum growth for an increasing metric to count as strong growth
    pub growth_percent: f64,
    /// Volatility above which a metric is flagged as unstable
    pub volatility_percent: f64,
    /// `|percentage_change|` above which a metric may be linked to high-impact events
    pub event_change_percent: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            critical_change_percent: 30.0,
            growth_percent: 10.0,
            volatility_percent: 15.0,
            event_change_percent: 15.0,
        }
    }
}

/// Full analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub trend_threshold_percent: f64,
    pub anomaly_std_devs: f64,
    pub zero_values: ZeroValuePolicy,
    pub impact_window_days: i64,
    pub insights: InsightThresholds,
    /// Optional cap on returned insights (None = uncapped)
    pub max_insights: Option<usize>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_threshold_percent: TREND_THRESHOLD_PERCENT,
            anomaly_std_devs: DEFAULT_ANOMALY_STD_DEVS,
            zero_values: ZeroValuePolicy::Include,
            impact_window_days: 30,
            insights: InsightThresholds::default(),
            max_insights: None,
        }
    }
}

impl AnalyticsConfig {
    /// Load config, preferring `override_path`, then the default override
    /// location, then the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path.filter(|p| !p.exists()) {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        }

        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .filter(|p| p.exists());

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading analytics config");
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content)
            }
            None => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    analysis: Option<RawAnalysis>,
    comparison: Option<RawComparison>,
    impact: Option<RawImpact>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    trend_threshold_percent: Option<f64>,
    anomaly_std_devs: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawComparison {
    exclude_zero_values: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawImpact {
    window_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    critical_change_percent: Option<f64>,
    growth_percent: Option<f64>,
    volatility_percent: Option<f64>,
    event_change_percent: Option<f64>,
    max_results: Option<usize>,
}

fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(analysis) = raw.analysis {
        if let Some(threshold) = analysis.trend_threshold_percent {
            config.trend_threshold_percent = non_negative("trend_threshold_percent", threshold)?;
        }
        if let Some(std_devs) = analysis.anomaly_std_devs {
            config.anomaly_std_devs = non_negative("anomaly_std_devs", std_devs)?;
        }
    }

    if let Some(comparison) = raw.comparison {
        if let Some(exclude) = comparison.exclude_zero_values {
            config.zero_values = if exclude {
                ZeroValuePolicy::Exclude
            } else {
                ZeroValuePolicy::Include
            };
        }
    }

    if let Some(impact) = raw.impact {
        if let Some(days) = impact.window_days {
            if days <= 0 || days > MAX_WINDOW_DAYS {
                return Err(Error::Config(format!(
                    "window_days must be between 1 and {}, got {}",
                    MAX_WINDOW_DAYS, days
                )));
            }
            config.impact_window_days = days;
        }
    }

    if let Some(insights) = raw.insights {
        let t = &mut config.insights;
        if let Some(v) = insights.critical_change_percent {
            t.critical_change_percent = non_negative("critical_change_percent", v)?;
        }
        if let Some(v) = insights.growth_percent {
            t.growth_percent = non_negative("growth_percent", v)?;
        }
        if let Some(v) = insights.volatility_percent {
            t.volatility_percent = non_negative("volatility_percent", v)?;
        }
        if let Some(v) = insights.event_change_percent {
            t.event_change_percent = non_negative("event_change_percent", v)?;
        }
        config.max_insights = insights.max_results;
    }

    Ok(config)
}

fn non_negative(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}
