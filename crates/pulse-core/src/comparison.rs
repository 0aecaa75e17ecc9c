//! Period-over-period comparison of a metric's average value

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{DateWindow, MetricSeriesPoint};
use crate::stats;

/// How zero-valued observations are treated when averaging a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroValuePolicy {
    /// Zeros are real observations and count toward the average
    #[default]
    Include,
    /// Drop zero and NaN values before averaging
    Exclude,
}

impl ZeroValuePolicy {
    fn keeps(&self, value: f64) -> bool {
        match self {
            Self::Include => true,
            Self::Exclude => value != 0.0 && !value.is_nan(),
        }
    }
}

/// Tiered size of a period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    /// Classify an absolute percent change: `> 20` high, `> 10` medium
    pub fn from_change_percent(change_percent: f64) -> Self {
        let magnitude = change_percent.abs();
        if magnitude > 20.0 {
            Self::High
        } else if magnitude > 10.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Averages of one metric over two periods and the change between them
///
/// Numeric fields are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub period1_avg: f64,
    pub period2_avg: f64,
    pub change: f64,
    pub change_percent: f64,
    pub significance: Significance,
}

/// A [`PeriodComparison`] tagged with its metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub metric_id: String,
    #[serde(flatten)]
    pub comparison: PeriodComparison,
}

#[derive(Debug, Clone, Default)]
pub struct PeriodComparator {
    zero_values: ZeroValuePolicy,
}

impl PeriodComparator {
    pub fn new(zero_values: ZeroValuePolicy) -> Self {
        Self { zero_values }
    }

    pub fn with_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.zero_values)
    }

    pub fn zero_values(&self) -> ZeroValuePolicy {
        self.zero_values
    }

    /// Compare `metric_id`'s average in `period1` against `period2`
    ///
    /// An empty period averages to `0`.
    pub fn compare(
        &self,
        series: &[MetricSeriesPoint],
        metric_id: &str,
        period1: &DateWindow,
        period2: &DateWindow,
    ) -> PeriodComparison {
        let avg1 = stats::average(&self.values_in(series, metric_id, period1));
        let avg2 = stats::average(&self.values_in(series, metric_id, period2));
        let change_percent = stats::percentage_change(avg1, avg2);

        PeriodComparison {
            period1_avg: stats::round(avg1, 2),
            period2_avg: stats::round(avg2, 2),
            change: stats::round(avg2 - avg1, 2),
            change_percent: stats::round(change_percent, 2),
            significance: Significance::from_change_percent(change_percent),
        }
    }

    /// [`compare`](Self::compare) for each metric, in the order given
    pub fn compare_many(
        &self,
        series: &[MetricSeriesPoint],
        metric_ids: &[String],
        period1: &DateWindow,
        period2: &DateWindow,
    ) -> Vec<MetricComparison> {
        metric_ids
            .iter()
            .map(|id| MetricComparison {
                metric_id: id.clone(),
                comparison: self.compare(series, id, period1, period2),
            })
            .collect()
    }

    fn values_in(
        &self,
        series: &[MetricSeriesPoint],
        metric_id: &str,
        window: &DateWindow,
    ) -> Vec<f64> {
        series
            .iter()
            .filter(|p| p.metric_id == metric_id && window.contains(p.date))
            .map(|p| p.value)
            .filter(|v| self.zero_values.keeps(*v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
        DateWindow::new(start, end).unwrap()
    }

    fn series() -> Vec<MetricSeriesPoint> {
        vec![
            MetricSeriesPoint::new("revenue", date(2024, 1, 10), 100.0),
            MetricSeriesPoint::new("revenue", date(2024, 1, 31), 110.0),
            MetricSeriesPoint::new("revenue", date(2024, 2, 1), 120.0),
            MetricSeriesPoint::new("revenue", date(2024, 2, 20), 130.0),
            MetricSeriesPoint::new("signups", date(2024, 1, 15), 999.0),
        ]
    }

    fn january() -> DateWindow {
        window(date(2024, 1, 1), date(2024, 1, 31))
    }

    fn february() -> DateWindow {
        window(date(2024, 2, 1), date(2024, 2, 29))
    }

    #[test]
    fn test_compare_periods() {
        let result =
            PeriodComparator::default().compare(&series(), "revenue", &january(), &february());

        assert_eq!(result.period1_avg, 105.0);
        assert_eq!(result.period2_avg, 125.0);
        assert_eq!(result.change, 20.0);
        assert_eq!(result.change_percent, 19.05);
        assert_eq!(result.significance, Significance::Medium);
    }

    #[test]
    fn test_significance_tiers() {
        assert_eq!(Significance::from_change_percent(25.0), Significance::High);
        assert_eq!(Significance::from_change_percent(-25.0), Significance::High);
        assert_eq!(Significance::from_change_percent(20.0), Significance::Medium);
        assert_eq!(Significance::from_change_percent(10.0), Significance::Low);
        assert_eq!(Significance::from_change_percent(0.0), Significance::Low);
    }

    #[test]
    fn test_empty_periods() {
        let empty = window(date(2030, 1, 1), date(2030, 1, 31));
        let result = PeriodComparator::default().compare(&series(), "revenue", &empty, &empty);
        assert_eq!(result.period1_avg, 0.0);
        assert_eq!(result.change_percent, 0.0);
        assert_eq!(result.significance, Significance::Low);

        // From nothing to something is +100% by convention
        let result = PeriodComparator::default().compare(&series(), "revenue", &empty, &january());
        assert_eq!(result.change_percent, 100.0);
        assert_eq!(result.significance, Significance::High);
    }

    #[test]
    fn test_zero_value_policy() {
        let mut data = series();
        data.push(MetricSeriesPoint::new("revenue", date(2024, 1, 20), 0.0));

        let included = PeriodComparator::new(ZeroValuePolicy::Include).compare(
            &data,
            "revenue",
            &january(),
            &february(),
        );
        assert_eq!(included.period1_avg, 70.0);

        let excluded = PeriodComparator::new(ZeroValuePolicy::Exclude).compare(
            &data,
            "revenue",
            &january(),
            &february(),
        );
        assert_eq!(excluded.period1_avg, 105.0);
    }

    #[test]
    fn test_compare_many_keeps_requested_order() {
        let ids = vec!["signups".to_string(), "revenue".to_string()];
        let results =
            PeriodComparator::default().compare_many(&series(), &ids, &january(), &february());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].metric_id, "signups");
        assert_eq!(results[0].comparison.period1_avg, 999.0);
        assert_eq!(results[0].comparison.period2_avg, 0.0);
        assert_eq!(results[1].comparison.change, 20.0);
    }
}
