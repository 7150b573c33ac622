//! Convert command implementation.
//!
//! Shows every pillar in all three quoting conventions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_credit::QuoteConverter;

use crate::cli::OutputFormat;
use crate::output::{format_bps, format_percent, print_header, print_output};
use crate::scenario::Scenario;

/// Arguments for the convert command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Coupon for pillars quoted as par spreads, in basis points
    #[arg(long, default_value = "100")]
    pub coupon_bps: f64,
}

/// One pillar in every convention.
#[derive(Debug, Serialize, Tabled)]
pub struct ConversionRow {
    #[tabled(rename = "Maturity")]
    pub maturity: String,
    #[tabled(rename = "Coupon (bp)")]
    pub coupon: String,
    #[tabled(rename = "Par Spread (bp)")]
    pub par_spread: String,
    #[tabled(rename = "Quoted Spread (bp)")]
    pub quoted_spread: String,
    #[tabled(rename = "PUF (%)")]
    pub puf: String,
}

/// Executes the convert command.
pub fn execute(args: ConvertArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let yc = scenario.yield_curve()?;
    let pillars = scenario.pillar_cds()?;
    let cc = scenario.credit_curve(&yc)?;

    let converter = QuoteConverter::new(scenario.calibrator());
    let pricer = converter.calibrator().pricer();
    let par_spreads = converter.par_spreads(&pillars, &yc, &cc)?;

    let mut rows = Vec::with_capacity(pillars.len());
    for ((pillar, cds), par) in scenario.pillars.iter().zip(&pillars).zip(par_spreads) {
        let coupon = pillar.quote.coupon().unwrap_or(args.coupon_bps / 1e4);
        let puf = pricer.points_upfront(cds, coupon, &yc, &cc);
        let quoted = converter.puf_to_quoted_spread(cds, coupon, &yc, puf)?;
        rows.push(ConversionRow {
            maturity: pillar.maturity.to_string(),
            coupon: format_bps(coupon),
            par_spread: format_bps(par),
            quoted_spread: format_bps(quoted),
            puf: format_percent(puf),
        });
    }

    print_header(&format!("Pillar quotes as of {}", scenario.trade_date), format);
    print_output(&rows, format)
}
