//! Insight Engine - ranked observations about analyzed metrics
//!
//! The engine runs a fixed set of rules over metric analyses and the business
//! events of the same window, then ranks what they produce by confidence.
//!
//! ## Built-in Rules
//!
//! - **Critical Change** - Metrics that moved more than 30% either way
//! - **Strong Growth** - Increasing metrics up more than 10%
//! - **Volatility** - Metrics with a coefficient of variation above 15%
//! - **Event Correlation** - High-impact events alongside metrics that moved
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate(&report.analyses, &events);
//! ```

pub mod critical_change;
pub mod engine;
pub mod event_correlation;
pub mod strong_growth;
pub mod types;
pub mod volatility;

pub use critical_change::CriticalChangeRule;
pub use engine::{InsightContext, InsightEngine, InsightRule};
pub use event_correlation::EventCorrelationRule;
pub use strong_growth::StrongGrowthRule;
pub use types::{Insight, InsightType, Priority};
pub use volatility::VolatilityRule;
