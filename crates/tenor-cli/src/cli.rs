//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CalibrateArgs, ConvertArgs, Cs01Args, CurveArgs};

/// Tenor - ISDA CDS credit curve analytics CLI
#[derive(Parser)]
#[command(name = "tenor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging of curve builds and calibrations
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the yield curve and show its nodes
    Curve(CurveArgs),

    /// Calibrate the credit curve to the pillar quotes
    Calibrate(CalibrateArgs),

    /// Show each pillar as par spread, quoted spread and points up front
    Convert(ConvertArgs),

    /// Parallel or bucketed CS01 of the scenario trades
    Cs01(Cs01Args),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
