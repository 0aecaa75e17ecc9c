//! Statistical primitives shared by the analytics modules
//!
//! Every function here is total: empty or degenerate input yields a neutral
//! value (`0`, an empty list, [`Trend::Stable`]) instead of an error, because
//! sparse and freshly created metrics are a normal steady state.

use serde::{Deserialize, Serialize};

/// Net change (in percent of the first value) a series must exceed to count as
/// trending
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Standard deviations from the mean beyond which a value is anomalous
pub const DEFAULT_ANOMALY_STD_DEVS: f64 = 2.0;

/// Scales a median absolute deviation to be comparable with a standard
/// deviation for normally distributed data
const MAD_SCALE: f64 = 0.6745;

/// Qualitative direction of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percent change from `old` to `new`
///
/// A zero baseline has no meaningful relative change. By convention this
/// returns `0` when both values are zero and `100` otherwise, whatever the sign
/// of `new`.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new == 0.0 { 0.0 } else { 100.0 };
    }
    (new - old) / old * 100.0
}

/// Arithmetic mean, `0` for empty input
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, `0` for empty input
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divides by N), `0` for empty input
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = average(values);
    let squared: Vec<f64> = values.iter().map(|v| (v - mean).powi(2)).collect();
    average(&squared).sqrt()
}

/// Pearson correlation coefficient in `[-1, 1]`
///
/// Returns `0` for mismatched lengths, empty input, or a constant series
/// (zero denominator).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || denominator.is_nan() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Values deviating from the mean by more than `threshold_std_devs` standard
/// deviations
///
/// Mean and deviation are computed once over the whole input. Input order is
/// preserved and repeated values are reported each time they occur.
pub fn detect_anomalies(values: &[f64], threshold_std_devs: f64) -> Vec<f64> {
    let mean = average(values);
    let limit = threshold_std_devs * standard_deviation(values);

    values
        .iter()
        .copied()
        .filter(|v| (v - mean).abs() > limit)
        .collect()
}

/// Median/MAD variant of [`detect_anomalies`]
///
/// Uses the modified z-score `0.6745 * |v - median| / MAD`. A single outlier
/// inflates the mean and standard deviation it is measured against, so the
/// plain z-score can never exceed `sqrt(n - 1)` on a population of `n`; the
/// median-based score has no such ceiling. Returns nothing when MAD is zero.
pub fn detect_anomalies_robust(values: &[f64], threshold: f64) -> Vec<f64> {
    let center = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    let mad = median(&deviations);

    if mad == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .copied()
        .filter(|v| MAD_SCALE * (v - center).abs() / mad > threshold)
        .collect()
}

/// Classify a series by comparing its last value to its first
///
/// Intermediate values are ignored. Uses [`TREND_THRESHOLD_PERCENT`].
pub fn classify_trend(values: &[f64]) -> Trend {
    classify_trend_with_threshold(values, TREND_THRESHOLD_PERCENT)
}

/// [`classify_trend`] with an explicit materiality threshold
///
/// The net change relative to `|first|`, rounded to 2 decimals, must exceed
/// `threshold_percent` in magnitude. From a zero start any nonzero change is
/// material.
pub fn classify_trend_with_threshold(values: &[f64], threshold_percent: f64) -> Trend {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return Trend::Stable;
    };
    if values.len() < 2 {
        return Trend::Stable;
    }

    let delta = last - first;
    if first == 0.0 {
        return direction(delta);
    }

    let relative = round(delta / first.abs() * 100.0, 2);
    if relative.abs() > threshold_percent {
        direction(delta)
    } else {
        Trend::Stable
    }
}

fn direction(delta: f64) -> Trend {
    if delta > 0.0 {
        Trend::Increasing
    } else if delta < 0.0 {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Round half-up to `decimals` places
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}
