//! Tenor CLI - ISDA CDS credit curve analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the yield curve of a scenario
//! tenor curve demos/scenario.toml
//!
//! # Calibrate the credit curve
//! tenor calibrate demos/scenario.toml
//!
//! # Par spread, quoted spread and PUF per pillar
//! tenor convert demos/scenario.toml --format json
//!
//! # Bucketed CS01 of the scenario trades
//! tenor cs01 demos/scenario.toml --bucketed --format csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod scenario;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that json and csv output stay parseable
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tenor=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Curve(args) => commands::curve::execute(args, format)?,
        Commands::Calibrate(args) => commands::calibrate::execute(args, format)?,
        Commands::Convert(args) => commands::convert::execute(args, format)?,
        Commands::Cs01(args) => commands::cs01::execute(args, format)?,
    }

    Ok(())
}
