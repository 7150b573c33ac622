//! Calibrate command implementation.
//!
//! Bootstraps the credit curve of a scenario from its pillar quotes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_curves::Curve;

use crate::cli::OutputFormat;
use crate::output::{format_percent, print_header, print_output};
use crate::scenario::Scenario;

/// Arguments for the calibrate command.
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
}

/// One credit curve node.
#[derive(Debug, Serialize, Tabled)]
pub struct CreditNodeRow {
    #[tabled(rename = "Maturity")]
    pub maturity: String,
    #[tabled(rename = "Quote")]
    pub quote: String,
    #[tabled(rename = "Time")]
    pub time: f64,
    #[tabled(rename = "Forward Hazard (%)")]
    pub hazard: String,
    #[tabled(rename = "Survival")]
    pub survival: f64,
}

/// Executes the calibrate command.
pub fn execute(args: CalibrateArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let yc = scenario.yield_curve()?;
    let cc = scenario.credit_curve(&yc)?;

    let rows: Vec<CreditNodeRow> = scenario
        .pillars
        .iter()
        .zip(cc.times().iter().zip(cc.forward_hazards()))
        .map(|(pillar, (&t, &h))| CreditNodeRow {
            maturity: pillar.maturity.to_string(),
            quote: pillar.quote.to_string(),
            time: t,
            hazard: format_percent(h),
            survival: cc.survival_probability(t),
        })
        .collect();

    print_header(
        &format!(
            "Credit curve as of {} ({})",
            scenario.trade_date, scenario.config.calibration.accrual_on_default
        ),
        format,
    );
    print_output(&rows, format)
}
