//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, CSV loading, windows) and `config`
//! - `analyze` - Per-metric analysis
//! - `insights` - Ranked insights from metrics and events
//! - `compare` - Period-over-period comparison
//! - `impact` - Event impact ratios
//! - `whatif` - What-if projections

pub mod analyze;
pub mod compare;
pub mod core;
pub mod impact;
pub mod insights;
pub mod whatif;

// Re-export command functions for main.rs
pub use analyze::*;
pub use compare::*;
pub use self::core::*;
pub use impact::*;
pub use insights::*;
pub use whatif::*;

use anyhow::{Context, Result};
use serde::Serialize;

/// Output mode selected by the global `--json` flag
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", json);
        Ok(())
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
