//! Pulse CLI - Statistical analytics for business metrics
//!
//! Usage:
//!   pulse analyze --values metrics.csv --period 90d
//!   pulse insights --values metrics.csv --events events.csv
//!   pulse compare --values metrics.csv --metric revenue --from1 ... --to2 ...
//!   pulse impact --values metrics.csv --events events.csv --event evt-1
//!   pulse whatif --values metrics.csv --name "Price rise" --assume revenue=10

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let output = commands::Output::new(cli.json);

    match cli.command {
        Commands::Analyze {
            values,
            metrics,
            window,
        } => {
            let window = commands::resolve_window(&window)?;
            commands::cmd_analyze(&config, &values, &metrics, &window, output)
        }
        Commands::Insights {
            values,
            events,
            metrics,
            window,
        } => {
            let window = commands::resolve_window(&window)?;
            commands::cmd_insights(
                &config,
                &values,
                events.as_deref(),
                &metrics,
                &window,
                output,
            )
        }
        Commands::Compare {
            values,
            metrics,
            from1,
            to1,
            from2,
            to2,
            exclude_zero,
        } => {
            let period1 = commands::parse_window(&from1, &to1)?;
            let period2 = commands::parse_window(&from2, &to2)?;
            commands::cmd_compare(
                &config,
                &values,
                &metrics,
                &period1,
                &period2,
                exclude_zero,
                output,
            )
        }
        Commands::Impact {
            values,
            events,
            event,
            metrics,
            window_days,
        } => commands::cmd_impact(
            &config,
            &values,
            &events,
            &event,
            &metrics,
            window_days,
            output,
        ),
        Commands::Whatif {
            values,
            name,
            assumptions,
            metrics,
            window,
        } => {
            let window = commands::resolve_window(&window)?;
            let assumptions = commands::parse_assumptions(&assumptions)?;
            commands::cmd_whatif(&config, &values, &name, assumptions, &metrics, &window, output)
        }
        Commands::Config => commands::cmd_config(&config, cli.config.as_deref(), output),
    }
}
