//! TOML market scenarios.
//!
//! A scenario holds everything a command needs:
//!
//! ```toml
//! trade_date = "2013-06-04"
//! pillar_accrual_start = "2013-06-04"
//!
//! [[yield_curve]]
//! kind = "MoneyMarket"
//! tenor = "6M"
//! rate = 0.004153
//!
//! [[pillars]]
//! maturity = "2018-06-20"
//! quote = { type = "par_spread", spread = 0.0044 }
//!
//! [[trades]]
//! name = "5Y"
//! maturity = "2018-06-20"
//! coupon = 0.01
//!
//! [config.calibration]
//! arbitrage_handling = "ZeroHazardRate"
//! ```
//!
//! Pillars accrue from `pillar_accrual_start`, or from the previous IMM
//! date when it is absent. Trades do the same with their own
//! `accrual_start`.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use tenor_core::types::Date;
use tenor_core::validation::Validate;
use tenor_credit::prelude::*;
use tenor_curves::prelude::*;

use crate::error::{CliError, CliResult};

fn default_notional() -> f64 {
    1e6
}

/// A calibration pillar: maturity and market quote.
#[derive(Debug, Clone, Deserialize)]
pub struct PillarSpec {
    /// Scheduled maturity.
    pub maturity: Date,
    /// Market quote.
    pub quote: CdsQuote,
}

/// A target trade for conversions and risk.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeSpec {
    /// Display name, the maturity when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Scheduled maturity.
    pub maturity: Date,
    /// Accrual start, the previous IMM date when absent.
    #[serde(default)]
    pub accrual_start: Option<Date>,
    /// Running coupon.
    pub coupon: f64,
    /// Notional used to scale CS01.
    #[serde(default = "default_notional")]
    pub notional: f64,
}

impl TradeSpec {
    /// Name shown in reports.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.maturity.to_string())
    }
}

/// A complete market scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Trade (valuation) date.
    pub trade_date: Date,
    /// Spot date of the yield curve instruments, from the spot lag when
    /// absent.
    #[serde(default)]
    pub spot_date: Option<Date>,
    /// Accrual start of every pillar.
    #[serde(default)]
    pub pillar_accrual_start: Option<Date>,
    /// Yield curve instruments.
    pub yield_curve: Vec<YieldCurveInstrument>,
    /// Credit curve pillars in maturity order.
    pub pillars: Vec<PillarSpec>,
    /// Target trades.
    #[serde(default)]
    pub trades: Vec<TradeSpec>,
    /// Analytics configuration.
    #[serde(default)]
    pub config: CreditConfig,
}

impl Scenario {
    /// Parses and checks a TOML scenario.
    pub fn from_toml_str(s: &str) -> CliResult<Self> {
        let scenario: Self = toml::from_str(s).map_err(|e| CliError::InvalidScenario(e.to_string()))?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Reads a TOML scenario file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            instruments = scenario.yield_curve.len(),
            pillars = scenario.pillars.len(),
            trades = scenario.trades.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    fn check(&self) -> CliResult<()> {
        if self.yield_curve.is_empty() {
            return Err(CliError::InvalidScenario("no yield curve instruments".to_string()));
        }
        if self.pillars.is_empty() {
            return Err(CliError::InvalidScenario("no credit curve pillars".to_string()));
        }
        if let Some(w) = self.pillars.windows(2).find(|w| w[1].maturity <= w[0].maturity) {
            return Err(CliError::InvalidScenario(format!(
                "pillar maturities must increase, {} follows {}",
                w[1].maturity, w[0].maturity
            )));
        }
        for pillar in &self.pillars {
            pillar.quote.check()?;
        }
        for trade in &self.trades {
            if !(trade.coupon.is_finite() && trade.notional.is_finite()) {
                return Err(CliError::InvalidScenario(format!(
                    "trade {} has a non-finite coupon or notional",
                    trade.label()
                )));
            }
        }
        self.config.validate_or_error().map_err(CreditError::from)?;
        Ok(())
    }

    /// Builds the ISDA yield curve.
    pub fn yield_curve(&self) -> CliResult<YieldCurve> {
        let builder = IsdaYieldCurveBuilder::default();
        let curve = match self.spot_date {
            Some(spot) => builder.build_with_spot(self.trade_date, spot, &self.yield_curve)?,
            None => builder.build(self.trade_date, &self.yield_curve)?,
        };
        Ok(curve)
    }

    /// CDS builder on the scenario conventions.
    pub fn cds_builder(&self) -> CdsAnalyticBuilder {
        CdsAnalyticBuilder::new(self.trade_date).with_conventions(self.config.cds)
    }

    /// Pillar CDSs.
    pub fn pillar_cds(&self) -> CliResult<Vec<CdsAnalytic>> {
        let builder = self.cds_builder();
        let cds = self
            .pillars
            .iter()
            .map(|p| match self.pillar_accrual_start {
                Some(start) => builder.build(start, p.maturity),
                None => builder.standard(p.maturity),
            })
            .collect::<CreditResult<Vec<_>>>()?;
        Ok(cds)
    }

    /// Pillar quotes.
    pub fn quotes(&self) -> Vec<CdsQuote> {
        self.pillars.iter().map(|p| p.quote).collect()
    }

    /// Trade CDSs, failing when there are none.
    pub fn trade_cds(&self) -> CliResult<Vec<CdsAnalytic>> {
        if self.trades.is_empty() {
            return Err(CliError::NoTrades);
        }
        let builder = self.cds_builder();
        let cds = self
            .trades
            .iter()
            .map(|t| match t.accrual_start {
                Some(start) => builder.build(start, t.maturity),
                None => builder.standard(t.maturity),
            })
            .collect::<CreditResult<Vec<_>>>()?;
        Ok(cds)
    }

    /// Calibrator on the scenario settings.
    pub fn calibrator(&self) -> CreditCurveCalibrator {
        CreditCurveCalibrator::new(self.config.calibration)
    }

    /// Credit curve calibrated to the pillars.
    pub fn credit_curve(&self, yc: &YieldCurve) -> CliResult<CreditCurve> {
        let pillars = self.pillar_cds()?;
        let curve = self.calibrator().calibrate_quotes(&pillars, &self.quotes(), yc)?;
        Ok(curve)
    }
}
