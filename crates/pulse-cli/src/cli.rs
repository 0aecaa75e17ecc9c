//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pulse - Statistical analytics for business metrics
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Trends, anomalies and insights for business metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analytics config file (defaults to the user data dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Analysis window: a trailing period, or explicit `--from`/`--to` dates
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// Trailing period: 7d, 30d, 90d, 1m, 3m, 6m, 1y, all
    #[arg(short, long, default_value = "all")]
    pub period: String,

    /// Window start (YYYY-MM-DD), used together with --to
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Window end (YYYY-MM-DD), used together with --from
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze trend, volatility and anomalies per metric
    Analyze {
        /// Metric values CSV (metric_id,date,value)
        #[arg(long)]
        values: PathBuf,

        /// Only analyze these metrics (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Generate ranked insights from metrics and events
    Insights {
        /// Metric values CSV (metric_id,date,value)
        #[arg(long)]
        values: PathBuf,

        /// Events CSV (id,name,category,impact,start_date,end_date)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Only consider these metrics (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Compare metric averages between two periods
    Compare {
        /// Metric values CSV (metric_id,date,value)
        #[arg(long)]
        values: PathBuf,

        /// Metrics to compare (repeatable)
        #[arg(short, long = "metric", required = true)]
        metrics: Vec<String>,

        /// First period start (YYYY-MM-DD)
        #[arg(long)]
        from1: String,

        /// First period end (YYYY-MM-DD)
        #[arg(long)]
        to1: String,

        /// Second period start (YYYY-MM-DD)
        #[arg(long)]
        from2: String,

        /// Second period end (YYYY-MM-DD)
        #[arg(long)]
        to2: String,

        /// Ignore zero values when averaging (overrides config)
        #[arg(long)]
        exclude_zero: bool,
    },

    /// Estimate an event's impact ratio on metrics
    Impact {
        /// Metric values CSV (metric_id,date,value)
        #[arg(long)]
        values: PathBuf,

        /// Events CSV (id,name,category,impact,start_date,end_date)
        #[arg(long)]
        events: PathBuf,

        /// Event ID to evaluate
        #[arg(long)]
        event: String,

        /// Metrics to evaluate (defaults to all metrics in the values file)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        /// Days observed before and after the event (overrides config)
        #[arg(long)]
        window_days: Option<i64>,
    },

    /// Project metrics under percent-change assumptions
    Whatif {
        /// Metric values CSV (metric_id,date,value)
        #[arg(long)]
        values: PathBuf,

        /// Scenario name
        #[arg(long)]
        name: String,

        /// Assumption as METRIC=PERCENT, e.g. revenue=10 (repeatable)
        #[arg(short, long = "assume")]
        assumptions: Vec<String>,

        /// Only project these metrics (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Show the effective analytics configuration
    Config,
}
