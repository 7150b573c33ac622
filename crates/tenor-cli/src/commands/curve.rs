//! Curve command implementation.
//!
//! Builds the ISDA yield curve of a scenario and shows its nodes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_curves::Curve;

use crate::cli::OutputFormat;
use crate::output::{format_percent, print_header, print_output};
use crate::scenario::Scenario;

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
}

/// One yield curve node.
#[derive(Debug, Serialize, Tabled)]
pub struct YieldNodeRow {
    #[tabled(rename = "Instrument")]
    pub instrument: String,
    #[tabled(rename = "Time")]
    pub time: f64,
    #[tabled(rename = "Zero Rate (%)")]
    pub zero_rate: String,
    #[tabled(rename = "Discount Factor")]
    pub discount_factor: f64,
}

/// Executes the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let curve = scenario.yield_curve()?;

    // nodes come out in maturity order
    let mut instruments = scenario.yield_curve.clone();
    instruments.sort_by(|a, b| a.tenor.approx_years().total_cmp(&b.tenor.approx_years()));

    let rows: Vec<YieldNodeRow> = instruments
        .iter()
        .zip(curve.times())
        .map(|(instrument, &t)| YieldNodeRow {
            instrument: format!("{:?} {}", instrument.kind, instrument.tenor),
            time: t,
            zero_rate: format_percent(curve.zero_rate(t)),
            discount_factor: curve.discount_factor(t),
        })
        .collect();

    print_header(&format!("Yield curve as of {}", scenario.trade_date), format);
    print_output(&rows, format)
}
