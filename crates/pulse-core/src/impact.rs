//! Event impact estimation
//!
//! Compares a metric's average in the `window_days` before an event starts with
//! its average in the `window_days` after it ends. The resulting impact ratio is
//! a signed magnitude (`0.25` = the metric averaged 25% higher afterwards). It
//! is not a correlation coefficient, it is not bounded to `[-1, 1]`, and it says
//! nothing about causation.

use std::collections::BTreeMap;

use crate::models::{BusinessEvent, DateWindow, MetricSeriesPoint};
use crate::stats;

/// Default number of days observed on each side of an event
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Largest accepted window (about a century)
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Before/after windows for an event
///
/// Both windows include the boundary day, so for a single-day event the event
/// date itself is counted on both sides.
pub fn event_windows(event: &BusinessEvent, window_days: i64) -> (DateWindow, DateWindow) {
    (
        DateWindow::days_before(event.start_date, window_days),
        DateWindow::days_after(event.effective_end(), window_days),
    )
}

/// Impact ratio of `event` on one metric
///
/// Returns `None` when either side of the event has no observations, which
/// signals missing data rather than "no effect".
pub fn estimate_impact_ratio(
    series: &[MetricSeriesPoint],
    metric_id: &str,
    event: &BusinessEvent,
    window_days: i64,
) -> Option<f64> {
    let (before, after) = event_windows(event, window_days);

    let values_in = |window: &DateWindow| -> Vec<f64> {
        series
            .iter()
            .filter(|p| p.metric_id == metric_id && window.contains(p.date))
            .map(|p| p.value)
            .collect()
    };

    let before_values = values_in(&before);
    let after_values = values_in(&after);
    if before_values.is_empty() || after_values.is_empty() {
        tracing::debug!(
            event = event.id.as_str(),
            metric = metric_id,
            before = before_values.len(),
            after = after_values.len(),
            "Insufficient data around event"
        );
        return None;
    }

    let change =
        stats::percentage_change(stats::average(&before_values), stats::average(&after_values));
    Some(stats::round(change / 100.0, 4))
}

/// Impact ratios of `event` for each metric that has data on both sides
pub fn estimate_impact_ratios(
    series: &[MetricSeriesPoint],
    event: &BusinessEvent,
    metric_ids: &[String],
    window_days: i64,
) -> BTreeMap<String, f64> {
    metric_ids
        .iter()
        .filter_map(|id| {
            estimate_impact_ratio(series, id, event, window_days).map(|ratio| (id.clone(), ratio))
        })
        .collect()
}
