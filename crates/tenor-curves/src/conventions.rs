//! Yield curve bootstrap conventions.
//!
//! The defaults are the ISDA CDS standard model conventions: ACT/360 money
//! market deposits, 6M 30/360 fixed swap legs, ACT/365F curve time and
//! Modified Following on a weekend-only calendar.
//!
//! Conventions deserialize from TOML or JSON with every field optional:
//!
//! ```rust
//! use tenor_curves::YieldCurveConventions;
//! use tenor_core::daycounts::DayCountConvention;
//!
//! let conv: YieldCurveConventions = serde_json::from_str(r#"{"spot_lag": 0}"#).unwrap();
//! assert_eq!(conv.spot_lag, 0);
//! assert_eq!(conv.swap_day_count, DayCountConvention::Thirty360);
//! ```

use serde::{Deserialize, Serialize};

use tenor_core::calendars::BusinessDayConvention;
use tenor_core::daycounts::DayCountConvention;
use tenor_core::types::Period;
use tenor_core::validation::{check_range, Validate, ValidationError};
use tenor_math::solvers::SolverConfig;

/// Conventions of the ISDA money-market and swap yield curve bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldCurveConventions {
    /// Accrual day count of money-market deposits.
    #[serde(default = "default_money_market_day_count")]
    pub money_market_day_count: DayCountConvention,

    /// Accrual day count of the swap fixed leg.
    #[serde(default = "default_swap_day_count")]
    pub swap_day_count: DayCountConvention,

    /// Payment interval of the swap fixed leg.
    #[serde(default = "default_swap_interval")]
    pub swap_interval: Period,

    /// Day count converting dates to curve times.
    #[serde(default = "default_curve_day_count")]
    pub curve_day_count: DayCountConvention,

    /// Adjustment of maturities and swap payment dates.
    #[serde(default = "default_business_day_convention")]
    pub business_day_convention: BusinessDayConvention,

    /// Business days from trade date to spot date.
    #[serde(default = "default_spot_lag")]
    pub spot_lag: u32,

    /// Residual tolerance of the swap node root finder.
    #[serde(default = "default_solver_tolerance")]
    pub solver_tolerance: f64,

    /// Iteration cap of the swap node root finder.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_money_market_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_swap_day_count() -> DayCountConvention {
    DayCountConvention::Thirty360
}

fn default_swap_interval() -> Period {
    Period::months(6)
}

fn default_curve_day_count() -> DayCountConvention {
    DayCountConvention::Act365Fixed
}

fn default_business_day_convention() -> BusinessDayConvention {
    BusinessDayConvention::ModifiedFollowing
}

fn default_spot_lag() -> u32 {
    2
}

fn default_solver_tolerance() -> f64 {
    1e-14
}

fn default_max_iterations() -> u32 {
    100
}

impl Default for YieldCurveConventions {
    fn default() -> Self {
        Self::isda_standard()
    }
}

impl YieldCurveConventions {
    /// ISDA CDS standard model conventions.
    pub fn isda_standard() -> Self {
        Self {
            money_market_day_count: default_money_market_day_count(),
            swap_day_count: default_swap_day_count(),
            swap_interval: default_swap_interval(),
            curve_day_count: default_curve_day_count(),
            business_day_convention: default_business_day_convention(),
            spot_lag: default_spot_lag(),
            solver_tolerance: default_solver_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }

    /// Sets the swap fixed leg payment interval.
    #[must_use]
    pub fn with_swap_interval(mut self, interval: Period) -> Self {
        self.swap_interval = interval;
        self
    }

    /// Sets the spot lag in business days.
    #[must_use]
    pub fn with_spot_lag(mut self, spot_lag: u32) -> Self {
        self.spot_lag = spot_lag;
        self
    }

    /// Root finder settings for swap nodes.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.solver_tolerance, self.max_iterations)
    }
}

impl Validate for YieldCurveConventions {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.swap_interval.amount() <= 0 {
            errors.push(ValidationError::new(
                "swap_interval",
                format!("must be a positive period, got {}", self.swap_interval),
            ));
        }
        if self.spot_lag > 10 {
            errors.push(ValidationError::with_rule(
                "spot_lag",
                format!("{} business days is not a plausible spot lag", self.spot_lag),
                "range",
            ));
        }
        check_range(&mut errors, "solver_tolerance", self.solver_tolerance, 1e-16, 1e-4);
        if self.max_iterations == 0 {
            errors.push(ValidationError::new("max_iterations", "must be at least 1"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isda_defaults() {
        let conv = YieldCurveConventions::default();
        assert_eq!(conv.money_market_day_count, DayCountConvention::Act360);
        assert_eq!(conv.swap_interval, Period::months(6));
        assert_eq!(conv.business_day_convention, BusinessDayConvention::ModifiedFollowing);
        assert!(conv.is_valid());
    }

    #[test]
    fn test_invalid_conventions() {
        let conv = YieldCurveConventions::isda_standard()
            .with_swap_interval(Period::months(0))
            .with_spot_lag(30);
        let errors = conv.validate();
        assert_eq!(errors.len(), 2);
        assert!(conv.validate_or_error().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let conv = YieldCurveConventions::isda_standard().with_swap_interval(Period::months(3));
        let json = serde_json::to_string(&conv).unwrap();
        assert!(json.contains("\"3M\""));
        let back: YieldCurveConventions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conv);
    }
}
