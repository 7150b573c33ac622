//! CS01 command implementation.
//!
//! Parallel CS01 bumps every pillar quote together; bucketed CS01 bumps
//! them one at a time. Values are in currency per basis point of the
//! trade notional.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_credit::prelude::*;

use crate::cli::OutputFormat;
use crate::output::{format_bps, print_header, print_output};
use crate::scenario::Scenario;

/// Arguments for the cs01 command.
#[derive(Args, Debug)]
pub struct Cs01Args {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Report one CS01 per pillar instead of a parallel CS01
    #[arg(short, long)]
    pub bucketed: bool,
}

/// Parallel CS01 of one trade.
#[derive(Debug, Serialize, Tabled)]
pub struct ParallelRow {
    #[tabled(rename = "Trade")]
    pub trade: String,
    #[tabled(rename = "Maturity")]
    pub maturity: String,
    #[tabled(rename = "Coupon (bp)")]
    pub coupon: String,
    #[tabled(rename = "Notional")]
    pub notional: f64,
    #[tabled(rename = "CS01")]
    pub cs01: f64,
}

/// CS01 of one trade to one pillar.
#[derive(Debug, Serialize, Tabled)]
pub struct BucketRow {
    #[tabled(rename = "Trade")]
    pub trade: String,
    #[tabled(rename = "Pillar")]
    pub pillar: String,
    #[tabled(rename = "CS01")]
    pub cs01: f64,
}

/// Executes the cs01 command.
pub fn execute(args: Cs01Args, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let yc = scenario.yield_curve()?;
    let pillars = scenario.pillar_cds()?;
    let trades = scenario.trade_cds()?;
    let quotes = scenario.quotes();
    let calculator = SpreadSensitivityCalculator::from_config(&scenario.config);

    if args.bucketed {
        let coupons: Vec<f64> = scenario.trades.iter().map(|t| t.coupon).collect();
        let matrix = calculator.bucketed_cs01_matrix(&trades, &coupons, &pillars, &quotes, &yc)?;

        let mut rows = Vec::with_capacity(matrix.len());
        for (trade, buckets) in scenario.trades.iter().zip(matrix.rows()) {
            for (pillar, &cs01) in scenario.pillars.iter().zip(buckets.iter()) {
                rows.push(BucketRow {
                    trade: trade.label(),
                    pillar: pillar.maturity.to_string(),
                    cs01: notional_cs01(cs01, trade.notional),
                });
            }
        }
        print_header(&format!("Bucketed CS01 as of {}", scenario.trade_date), format);
        return print_output(&rows, format);
    }

    let mut rows = Vec::with_capacity(trades.len());
    for (trade, cds) in scenario.trades.iter().zip(&trades) {
        let cs01 = calculator.parallel_cs01_from_quotes(cds, trade.coupon, &pillars, &quotes, &yc)?;
        rows.push(ParallelRow {
            trade: trade.label(),
            maturity: trade.maturity.to_string(),
            coupon: format_bps(trade.coupon),
            notional: trade.notional,
            cs01: notional_cs01(cs01, trade.notional),
        });
    }
    print_header(&format!("Parallel CS01 as of {}", scenario.trade_date), format);
    print_output(&rows, format)
}
