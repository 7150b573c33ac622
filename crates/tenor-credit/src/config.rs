//! Credit analytics configuration.
//!
//! Contract conventions, calibration settings and CS01 bump settings. All
//! fields are optional when deserializing and default to the ISDA standard
//! model, so a TOML file only needs the overrides:
//!
//! ```rust
//! use tenor_credit::config::CreditConfig;
//! use tenor_credit::pricer::AccrualOnDefaultFormula;
//!
//! let config = CreditConfig::from_toml_str(r#"
//!     [calibration]
//!     accrual_on_default = "MarkitFix"
//!
//!     [sensitivity]
//!     bump_amount = 5e-4
//! "#).unwrap();
//!
//! assert_eq!(config.calibration.accrual_on_default, AccrualOnDefaultFormula::MarkitFix);
//! assert_eq!(config.cds.recovery_rate, 0.4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use tenor_core::calendars::BusinessDayConvention;
use tenor_core::daycounts::DayCountConvention;
use tenor_core::types::Period;
use tenor_core::validation::{check_range, Validate, ValidationError};
use tenor_math::solvers::SolverConfig;

use crate::calibration::ArbitrageHandling;
use crate::error::{CreditError, CreditResult};
use crate::pricer::AccrualOnDefaultFormula;
use crate::schedule::StubType;
use crate::sensitivity::BumpType;

// =============================================================================
// CDS CONVENTIONS
// =============================================================================

/// Contract conventions of a CDS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsConventions {
    /// Premium payment interval.
    #[serde(default = "default_payment_interval")]
    pub payment_interval: Period,

    /// Stub placement.
    #[serde(default)]
    pub stub_type: StubType,

    /// Adjustment of premium dates.
    #[serde(default)]
    pub business_day_convention: BusinessDayConvention,

    /// Day count of premium accrual.
    #[serde(default = "default_accrual_day_count")]
    pub accrual_day_count: DayCountConvention,

    /// Day count converting dates to curve times.
    #[serde(default = "default_curve_day_count")]
    pub curve_day_count: DayCountConvention,

    /// Protection runs from the start of the step-in day.
    #[serde(default = "default_true")]
    pub protection_start: bool,

    /// Accrued premium is paid on default.
    #[serde(default = "default_true")]
    pub pay_accrued_on_default: bool,

    /// Calendar days from trade date to step-in date.
    #[serde(default = "default_step_in_days")]
    pub step_in_days: u32,

    /// Business days from trade date to cash settlement.
    #[serde(default = "default_cash_settle_days")]
    pub cash_settle_days: u32,

    /// Recovery rate on default.
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: f64,
}

fn default_payment_interval() -> Period {
    Period::months(3)
}

fn default_accrual_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_curve_day_count() -> DayCountConvention {
    DayCountConvention::Act365Fixed
}

fn default_true() -> bool {
    true
}

fn default_step_in_days() -> u32 {
    1
}

fn default_cash_settle_days() -> u32 {
    3
}

fn default_recovery_rate() -> f64 {
    0.4
}

impl Default for CdsConventions {
    fn default() -> Self {
        Self::isda_standard()
    }
}

impl CdsConventions {
    /// Standard North American and European corporate CDS.
    pub fn isda_standard() -> Self {
        Self {
            payment_interval: default_payment_interval(),
            stub_type: StubType::FrontShort,
            business_day_convention: BusinessDayConvention::Following,
            accrual_day_count: default_accrual_day_count(),
            curve_day_count: default_curve_day_count(),
            protection_start: true,
            pay_accrued_on_default: true,
            step_in_days: default_step_in_days(),
            cash_settle_days: default_cash_settle_days(),
            recovery_rate: default_recovery_rate(),
        }
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets the stub type.
    #[must_use]
    pub fn with_stub_type(mut self, stub_type: StubType) -> Self {
        self.stub_type = stub_type;
        self
    }

    /// Sets the payment interval.
    #[must_use]
    pub fn with_payment_interval(mut self, interval: Period) -> Self {
        self.payment_interval = interval;
        self
    }

    /// Sets the protection-from-start-of-day flag.
    #[must_use]
    pub fn with_protection_start(mut self, protection_start: bool) -> Self {
        self.protection_start = protection_start;
        self
    }

    /// Sets the pay-accrued-on-default flag.
    #[must_use]
    pub fn with_pay_accrued_on_default(mut self, pay: bool) -> Self {
        self.pay_accrued_on_default = pay;
        self
    }
}

impl Validate for CdsConventions {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.payment_interval.amount() <= 0 {
            errors.push(ValidationError::new(
                "payment_interval",
                format!("must be a positive period, got {}", self.payment_interval),
            ));
        }
        if !(0.0..1.0).contains(&self.recovery_rate) {
            errors.push(ValidationError::with_rule(
                "recovery_rate",
                format!("must lie in [0, 1), got {}", self.recovery_rate),
                "range",
            ));
        }
        if self.cash_settle_days > 30 {
            errors.push(ValidationError::new(
                "cash_settle_days",
                format!("{} business days is not a plausible settlement lag", self.cash_settle_days),
            ));
        }

        errors
    }
}

// =============================================================================
// CALIBRATION CONFIGURATION
// =============================================================================

/// Credit curve calibration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Root finder tolerance on the node hazard rate.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Root finder iteration cap per node.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Treatment of quotes that need a negative forward hazard.
    #[serde(default)]
    pub arbitrage_handling: ArbitrageHandling,

    /// Accrued-on-default formula of the premium leg.
    #[serde(default)]
    pub accrual_on_default: AccrualOnDefaultFormula,
}

fn default_tolerance() -> f64 {
    1e-15
}

fn default_max_iterations() -> u32 {
    100
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            arbitrage_handling: ArbitrageHandling::default(),
            accrual_on_default: AccrualOnDefaultFormula::default(),
        }
    }
}

impl CalibrationConfig {
    /// Sets the arbitrage handling.
    #[must_use]
    pub fn with_arbitrage_handling(mut self, handling: ArbitrageHandling) -> Self {
        self.arbitrage_handling = handling;
        self
    }

    /// Sets the accrued-on-default formula.
    #[must_use]
    pub fn with_accrual_on_default(mut self, formula: AccrualOnDefaultFormula) -> Self {
        self.accrual_on_default = formula;
        self
    }

    /// Root finder settings.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

impl Validate for CalibrationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_range(&mut errors, "tolerance", self.tolerance, 1e-18, 1e-6);
        if self.max_iterations == 0 {
            errors.push(ValidationError::new("max_iterations", "must be at least 1"));
        }
        errors
    }
}

// =============================================================================
// SENSITIVITY CONFIGURATION
// =============================================================================

/// CS01 bump settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Spread bump as a fraction (1e-4 is one basis point).
    #[serde(default = "default_bump_amount")]
    pub bump_amount: f64,

    /// How the bump is applied to each quote.
    #[serde(default)]
    pub bump_type: BumpType,

    /// Run bucketed recalibrations on the rayon thread pool.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Arbitrage policy for the recalibrated curves. A bumped pillar on a
    /// flat or inverted curve can require a slightly negative forward hazard
    /// at the next pillar.
    #[serde(default = "default_bump_arbitrage_handling")]
    pub arbitrage_handling: ArbitrageHandling,
}

fn default_bump_amount() -> f64 {
    1e-4
}

fn default_bump_arbitrage_handling() -> ArbitrageHandling {
    ArbitrageHandling::Ignore
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            bump_amount: default_bump_amount(),
            bump_type: BumpType::default(),
            parallel: true,
            arbitrage_handling: default_bump_arbitrage_handling(),
        }
    }
}

impl Validate for SensitivityConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !(self.bump_amount.is_finite() && self.bump_amount != 0.0) {
            errors.push(ValidationError::new(
                "bump_amount",
                format!("must be finite and non-zero, got {}", self.bump_amount),
            ));
        }
        errors
    }
}

// =============================================================================
// CREDIT CONFIGURATION
// =============================================================================

/// Complete configuration of the credit analytics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditConfig {
    /// CDS contract conventions.
    #[serde(default)]
    pub cds: CdsConventions,

    /// Calibration settings.
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// CS01 settings.
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

impl CreditConfig {
    /// ISDA standard model settings.
    pub fn isda_standard() -> Self {
        Self::default()
    }

    /// ISDA standard model with the Markit accrued-on-default fix.
    pub fn markit_fix() -> Self {
        Self {
            calibration: CalibrationConfig::default()
                .with_accrual_on_default(AccrualOnDefaultFormula::MarkitFix),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> CreditResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| CreditError::config(e.to_string()))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CreditResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CreditError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> CreditResult<String> {
        toml::to_string_pretty(self).map_err(|e| CreditError::config(e.to_string()))
    }
}

impl Validate for CreditConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.cds.validate();
        errors.extend(self.calibration.validate());
        errors.extend(self.sensitivity.validate());
        errors
    }
}
