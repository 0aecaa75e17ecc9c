//! Domain models for Pulse

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One observation of a business metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeriesPoint {
    pub metric_id: String,
    pub date: NaiveDate,
    pub value: f64,
}

impl MetricSeriesPoint {
    pub fn new(metric_id: impl Into<String>, date: NaiveDate, value: f64) -> Self {
        Self {
            metric_id: metric_id.into(),
            date,
            value,
        }
    }
}

/// A discrete business action (campaign, launch, reorg, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEvent {
    pub id: String,
    pub name: String,
    pub category: EventCategory,
    pub impact: Impact,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl BusinessEvent {
    /// Last day of the event's observation window (`end_date`, or `start_date` for
    /// single-day events)
    pub fn effective_end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Observation window `[start_date, end_date ?? start_date]`
    pub fn observation_window(&self) -> DateWindow {
        DateWindow {
            start: self.start_date,
            end: self.effective_end(),
        }
    }

    /// True when the event was running at any point inside `window`
    pub fn overlaps(&self, window: &DateWindow) -> bool {
        self.start_date <= window.end && self.effective_end() >= window.start
    }
}

/// Business area an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Marketing,
    Operations,
    Finance,
    Hr,
    Product,
    Growth,
    Sales,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Operations => "operations",
            Self::Finance => "finance",
            Self::Hr => "hr",
            Self::Product => "product",
            Self::Growth => "growth",
            Self::Sales => "sales",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "marketing" => Ok(Self::Marketing),
            "operations" | "ops" => Ok(Self::Operations),
            "finance" => Ok(Self::Finance),
            "hr" => Ok(Self::Hr),
            "product" => Ok(Self::Product),
            "growth" => Ok(Self::Growth),
            "sales" => Ok(Self::Sales),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown event category: {}", s)),
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected impact of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    #[default]
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown impact: {}", s)),
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive date range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidData(format!(
                "Window start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Window of `days` days ending on (and including) `end`
    ///
    /// Saturates at [`NaiveDate::MIN`] instead of overflowing.
    pub fn days_before(end: NaiveDate, days: i64) -> Self {
        let start = Duration::try_days(days)
            .and_then(|d| end.checked_sub_signed(d))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Window of `days` days starting on (and including) `start`
    ///
    /// Saturates at [`NaiveDate::MAX`] instead of overflowing.
    pub fn days_after(start: NaiveDate, days: i64) -> Self {
        let end = Duration::try_days(days)
            .and_then(|d| start.checked_add_signed(d))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Trailing reporting periods offered by the dashboard's period picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days7,
    Days30,
    Days90,
    Months1,
    Months3,
    Months6,
    Year1,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days7 => "7d",
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::Months1 => "1m",
            Self::Months3 => "3m",
            Self::Months6 => "6m",
            Self::Year1 => "1y",
            Self::All => "all",
        }
    }

    /// Resolve to a concrete window ending on `today`
    pub fn window_ending(&self, today: NaiveDate) -> DateWindow {
        let start = match self {
            Self::Days7 => today - Duration::days(7),
            Self::Days30 => today - Duration::days(30),
            Self::Days90 => today - Duration::days(90),
            Self::Months1 => sub_months(today, 1),
            Self::Months3 => sub_months(today, 3),
            Self::Months6 => sub_months(today, 6),
            Self::Year1 => sub_months(today, 12),
            Self::All => NaiveDate::MIN,
        };
        DateWindow { start, end: today }
    }
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(Self::Days7),
            "30d" => Ok(Self::Days30),
            "90d" => Ok(Self::Days90),
            "1m" => Ok(Self::Months1),
            "3m" => Ok(Self::Months3),
            "6m" => Ok(Self::Months6),
            "1y" | "12m" => Ok(Self::Year1),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "Unknown period: {}. Available: 7d, 30d, 90d, 1m, 3m, 6m, 1y, all",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: Option<NaiveDate>) -> BusinessEvent {
        BusinessEvent {
            id: "evt-1".to_string(),
            name: "Spring Campaign".to_string(),
            category: EventCategory::Marketing,
            impact: Impact::High,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        assert!(DateWindow::new(date(2024, 3, 1), date(2024, 1, 1)).is_err());
        assert!(DateWindow::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(window.contains(date(2024, 1, 1)));
        assert!(window.contains(date(2024, 1, 31)));
        assert!(!window.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_event_overlap() {
        let window = DateWindow::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap();

        // Starts inside
        assert!(event(date(2024, 2, 10), None).overlaps(&window));
        // Ends inside
        assert!(event(date(2024, 1, 10), Some(date(2024, 2, 5))).overlaps(&window));
        // Spans the whole window
        assert!(event(date(2024, 1, 1), Some(date(2024, 3, 31))).overlaps(&window));
        // Entirely before
        assert!(!event(date(2024, 1, 1), Some(date(2024, 1, 31))).overlaps(&window));
        // Single-day event after
        assert!(!event(date(2024, 3, 1), None).overlaps(&window));
    }

    #[test]
    fn test_day_windows_saturate() {
        let window = DateWindow::days_before(date(2024, 3, 1), i64::MAX);
        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.end, date(2024, 3, 1));

        let window = DateWindow::days_after(date(2024, 3, 1), 1_000_000_000);
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, NaiveDate::MAX);
    }

    #[test]
    fn test_effective_end_defaults_to_start() {
        let e = event(date(2024, 2, 1), None);
        assert_eq!(e.effective_end(), date(2024, 2, 1));
        assert_eq!(e.observation_window().start, e.observation_window().end);
    }

    #[test]
    fn test_period_parsing_and_resolution() {
        let today = date(2024, 6, 15);
        assert_eq!(Period::from_str("6m").unwrap(), Period::Months6);
        assert!(Period::from_str("2w").is_err());

        let window = Period::Months6.window_ending(today);
        assert_eq!(window.start, date(2023, 12, 15));
        assert_eq!(window.end, today);

        let window = Period::Days30.window_ending(today);
        assert_eq!(window.start, date(2024, 5, 16));
    }

    #[test]
    fn test_category_and_impact_from_str() {
        assert_eq!(EventCategory::from_str("HR").unwrap(), EventCategory::Hr);
        assert!(EventCategory::from_str("astrology").is_err());
        assert_eq!(Impact::from_str(" high ").unwrap(), Impact::High);
        assert_eq!(Impact::default(), Impact::Medium);
    }
}
