//! Market quoting conventions for CDS.

use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// A CDS quote in one of the three market conventions.
///
/// All spreads, coupons and upfronts are fractions (0.01 is 100bp or one
/// point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CdsQuote {
    /// The coupon that makes the CDS worth zero.
    ParSpread {
        /// Par spread.
        spread: f64,
    },
    /// Spread of the flat curve that prices the CDS, traded at a standard
    /// coupon.
    QuotedSpread {
        /// Running coupon of the contract.
        coupon: f64,
        /// Quoted (flat) spread.
        spread: f64,
    },
    /// Upfront payment at a standard coupon.
    PointsUpFront {
        /// Running coupon of the contract.
        coupon: f64,
        /// Clean upfront per unit notional.
        puf: f64,
    },
}

impl CdsQuote {
    /// Running coupon, if the quote carries one.
    pub fn coupon(&self) -> Option<f64> {
        match *self {
            Self::ParSpread { .. } => None,
            Self::QuotedSpread { coupon, .. } | Self::PointsUpFront { coupon, .. } => Some(coupon),
        }
    }

    /// Spread of a spread quote.
    pub fn spread(&self) -> Option<f64> {
        match *self {
            Self::ParSpread { spread } | Self::QuotedSpread { spread, .. } => Some(spread),
            Self::PointsUpFront { .. } => None,
        }
    }

    /// Short name of the convention.
    pub fn convention(&self) -> &'static str {
        match self {
            Self::ParSpread { .. } => "par spread",
            Self::QuotedSpread { .. } => "quoted spread",
            Self::PointsUpFront { .. } => "points up front",
        }
    }

    /// Checks that every field is finite.
    pub fn check(&self) -> CreditResult<()> {
        let finite = match *self {
            Self::ParSpread { spread } => spread.is_finite(),
            Self::QuotedSpread { coupon, spread } => coupon.is_finite() && spread.is_finite(),
            Self::PointsUpFront { coupon, puf } => coupon.is_finite() && puf.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(CreditError::invalid_market_data(format!(
                "{} quote {self} is not finite",
                self.convention()
            )))
        }
    }
}

impl std::fmt::Display for CdsQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::ParSpread { spread } => write!(f, "{:.4}bp par", spread * 1e4),
            Self::QuotedSpread { coupon, spread } => {
                write!(f, "{:.4}bp quoted ({:.0}bp coupon)", spread * 1e4, coupon * 1e4)
            }
            Self::PointsUpFront { coupon, puf } => {
                write!(f, "{:.4}% upfront ({:.0}bp coupon)", puf * 100.0, coupon * 1e4)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Pillars {
        quotes: Vec<CdsQuote>,
    }

    #[test]
    fn test_quote_accessors() {
        let par = CdsQuote::ParSpread { spread: 0.0107 };
        let quoted = CdsQuote::QuotedSpread { coupon: 0.01, spread: 0.0125 };
        let puf = CdsQuote::PointsUpFront { coupon: 0.05, puf: -0.02 };

        assert_eq!(par.coupon(), None);
        assert_eq!(quoted.coupon(), Some(0.01));
        assert_eq!(puf.spread(), None);
        assert_eq!(quoted.spread(), Some(0.0125));
        assert_eq!(puf.convention(), "points up front");
    }

    #[test]
    fn test_quote_display() {
        let quoted = CdsQuote::QuotedSpread { coupon: 0.01, spread: 0.0125 };
        assert_eq!(quoted.to_string(), "125.0000bp quoted (100bp coupon)");
        let puf = CdsQuote::PointsUpFront { coupon: 0.05, puf: -0.02 };
        assert_eq!(puf.to_string(), "-2.0000% upfront (500bp coupon)");
    }

    #[test]
    fn test_quote_check() {
        assert!(CdsQuote::ParSpread { spread: 0.01 }.check().is_ok());
        let err = CdsQuote::PointsUpFront { coupon: 0.01, puf: f64::NAN }.check().unwrap_err();
        assert!(matches!(err, CreditError::InvalidMarketData { .. }));
    }

    #[test]
    fn test_quotes_from_toml() {
        let toml_str = r#"
            quotes = [
                { type = "par_spread", spread = 0.00107 },
                { type = "quoted_spread", coupon = 0.01, spread = 0.0125 },
                { type = "points_up_front", coupon = 0.05, puf = 0.031 },
            ]
        "#;
        let pillars: Pillars = toml::from_str(toml_str).unwrap();
        assert_eq!(pillars.quotes.len(), 3);
        assert_eq!(pillars.quotes[0], CdsQuote::ParSpread { spread: 0.00107 });
        assert_eq!(pillars.quotes[2], CdsQuote::PointsUpFront { coupon: 0.05, puf: 0.031 });
    }

    #[test]
    fn test_quote_json_tagging() {
        let quote = CdsQuote::QuotedSpread { coupon: 0.01, spread: 0.0125 };
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["type"], "quoted_spread");
        assert_eq!(json["coupon"], 0.01);

        let back: CdsQuote = serde_json::from_str(r#"{"type":"par_spread","spread":0.0107}"#).unwrap();
        assert_eq!(back, CdsQuote::ParSpread { spread: 0.0107 });
        assert!(serde_json::from_str::<CdsQuote>(r#"{"type":"running","spread":0.01}"#).is_err());
    }
}
