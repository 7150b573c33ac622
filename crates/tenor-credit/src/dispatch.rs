//! Pricing dispatch by instrument and model.
//!
//! Instruments are a closed enum and pricing functions are plain `fn`
//! pointers stored in a flat table keyed by `(InstrumentKind, ModelKind)`.
//! Adding a model or product means registering more entries.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use tenor_curves::{CreditCurve, YieldCurve};

use crate::cds::CdsAnalytic;
use crate::error::{CreditError, CreditResult};
use crate::pricer::{AccrualOnDefaultFormula, AnalyticCdsPricer, PriceType};

/// A priceable credit instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    /// A whole CDS, valued for the protection buyer.
    CreditDefaultSwap {
        /// Contract.
        cds: CdsAnalytic,
        /// Running coupon.
        coupon: f64,
    },
    /// The protection leg alone.
    ProtectionLeg {
        /// Contract.
        cds: CdsAnalytic,
    },
    /// The premium leg alone, clean.
    PremiumLeg {
        /// Contract.
        cds: CdsAnalytic,
        /// Running coupon.
        coupon: f64,
    },
}

impl Instrument {
    /// The dispatch key of the instrument.
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Self::CreditDefaultSwap { .. } => InstrumentKind::CreditDefaultSwap,
            Self::ProtectionLeg { .. } => InstrumentKind::ProtectionLeg,
            Self::PremiumLeg { .. } => InstrumentKind::PremiumLeg,
        }
    }

    /// The underlying contract.
    pub fn cds(&self) -> &CdsAnalytic {
        match self {
            Self::CreditDefaultSwap { cds, .. } | Self::ProtectionLeg { cds } | Self::PremiumLeg { cds, .. } => cds,
        }
    }
}

/// Instrument half of the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// [`Instrument::CreditDefaultSwap`]
    CreditDefaultSwap,
    /// [`Instrument::ProtectionLeg`]
    ProtectionLeg,
    /// [`Instrument::PremiumLeg`]
    PremiumLeg,
}

impl InstrumentKind {
    /// Every instrument kind.
    pub const ALL: [Self; 3] = [Self::CreditDefaultSwap, Self::ProtectionLeg, Self::PremiumLeg];
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreditDefaultSwap => "credit default swap",
            Self::ProtectionLeg => "protection leg",
            Self::PremiumLeg => "premium leg",
        };
        write!(f, "{name}")
    }
}

/// Model half of the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// ISDA standard model.
    #[default]
    IsdaStandard,
    /// ISDA model with Markit's accrual-on-default fix.
    MarkitFix,
    /// ISDA model with the exact accrual-on-default integral.
    Correct,
}

impl ModelKind {
    /// Every model kind.
    pub const ALL: [Self; 3] = [Self::IsdaStandard, Self::MarkitFix, Self::Correct];

    /// Accrual-on-default formula of the model.
    pub fn accrual_on_default(self) -> AccrualOnDefaultFormula {
        match self {
            Self::IsdaStandard => AccrualOnDefaultFormula::OriginalIsda,
            Self::MarkitFix => AccrualOnDefaultFormula::MarkitFix,
            Self::Correct => AccrualOnDefaultFormula::Correct,
        }
    }

    /// Pricer implementing the model.
    pub fn pricer(self) -> AnalyticCdsPricer {
        AnalyticCdsPricer::new(self.accrual_on_default())
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IsdaStandard => "ISDA standard",
            Self::MarkitFix => "Markit fix",
            Self::Correct => "correct accrual",
        };
        write!(f, "{name}")
    }
}

/// Curves an instrument is priced against.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditMarket {
    /// Discount curve.
    pub yield_curve: YieldCurve,
    /// Survival curve.
    pub credit_curve: CreditCurve,
}

impl CreditMarket {
    /// Bundles the two curves.
    pub fn new(yield_curve: YieldCurve, credit_curve: CreditCurve) -> Self {
        Self {
            yield_curve,
            credit_curve,
        }
    }
}

/// A pricing function: value per unit notional.
pub type PricingFn = fn(&Instrument, &CreditMarket) -> CreditResult<f64>;

/// Flat table of pricing functions.
///
/// ```rust
/// use tenor_core::types::Date;
/// use tenor_credit::cds::CdsAnalyticBuilder;
/// use tenor_credit::dispatch::{CreditMarket, Instrument, ModelKind, PricingTable};
/// use tenor_curves::{CreditCurve, YieldCurve};
///
/// let trade = Date::from_ymd(2013, 6, 4).unwrap();
/// let cds = CdsAnalyticBuilder::new(trade)
///     .build(trade, Date::from_ymd(2018, 6, 20).unwrap())
///     .unwrap();
/// let market = CreditMarket::new(YieldCurve::flat(0.02), CreditCurve::flat(0.01));
///
/// let table = PricingTable::standard();
/// let leg = table
///     .price(&Instrument::ProtectionLeg { cds }, ModelKind::IsdaStandard, &market)
///     .unwrap();
/// assert!(leg > 0.0);
/// ```
#[derive(Clone, Default)]
pub struct PricingTable {
    entries: HashMap<(InstrumentKind, ModelKind), PricingFn>,
}

impl fmt::Debug for PricingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingTable")
            .field("pairs", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PricingTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every instrument kind under every model.
    pub fn standard() -> Self {
        let mut table = Self::new();

        table.register(InstrumentKind::CreditDefaultSwap, ModelKind::IsdaStandard, |i, m| {
            price_cds(ModelKind::IsdaStandard, i, m)
        });
        table.register(InstrumentKind::CreditDefaultSwap, ModelKind::MarkitFix, |i, m| {
            price_cds(ModelKind::MarkitFix, i, m)
        });
        table.register(InstrumentKind::CreditDefaultSwap, ModelKind::Correct, |i, m| {
            price_cds(ModelKind::Correct, i, m)
        });

        table.register(InstrumentKind::ProtectionLeg, ModelKind::IsdaStandard, |i, m| {
            price_protection_leg(ModelKind::IsdaStandard, i, m)
        });
        table.register(InstrumentKind::ProtectionLeg, ModelKind::MarkitFix, |i, m| {
            price_protection_leg(ModelKind::MarkitFix, i, m)
        });
        table.register(InstrumentKind::ProtectionLeg, ModelKind::Correct, |i, m| {
            price_protection_leg(ModelKind::Correct, i, m)
        });

        table.register(InstrumentKind::PremiumLeg, ModelKind::IsdaStandard, |i, m| {
            price_premium_leg(ModelKind::IsdaStandard, i, m)
        });
        table.register(InstrumentKind::PremiumLeg, ModelKind::MarkitFix, |i, m| {
            price_premium_leg(ModelKind::MarkitFix, i, m)
        });
        table.register(InstrumentKind::PremiumLeg, ModelKind::Correct, |i, m| {
            price_premium_leg(ModelKind::Correct, i, m)
        });

        table
    }

    /// Registers `pricing` for the pair, returning the function it replaces.
    pub fn register(
        &mut self,
        instrument: InstrumentKind,
        model: ModelKind,
        pricing: PricingFn,
    ) -> Option<PricingFn> {
        self.entries.insert((instrument, model), pricing)
    }

    /// True if the pair has a pricing function.
    pub fn supports(&self, instrument: InstrumentKind, model: ModelKind) -> bool {
        self.entries.contains_key(&(instrument, model))
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prices `instrument` under `model`.
    pub fn price(&self, instrument: &Instrument, model: ModelKind, market: &CreditMarket) -> CreditResult<f64> {
        let kind = instrument.kind();
        let pricing = self
            .entries
            .get(&(kind, model))
            .ok_or_else(|| CreditError::unsupported_pricing(kind.to_string(), model.to_string()))?;
        pricing(instrument, market)
    }
}

fn mismatch(model: ModelKind, instrument: &Instrument) -> CreditError {
    CreditError::unsupported_pricing(instrument.kind().to_string(), model.to_string())
}

fn price_cds(model: ModelKind, instrument: &Instrument, market: &CreditMarket) -> CreditResult<f64> {
    match instrument {
        Instrument::CreditDefaultSwap { cds, coupon } => Ok(model.pricer().pv(
            cds,
            &market.yield_curve,
            &market.credit_curve,
            *coupon,
            PriceType::Clean,
        )),
        other => Err(mismatch(model, other)),
    }
}

fn price_protection_leg(model: ModelKind, instrument: &Instrument, market: &CreditMarket) -> CreditResult<f64> {
    match instrument {
        Instrument::ProtectionLeg { cds } => {
            Ok(model
                .pricer()
                .protection_leg(cds, &market.yield_curve, &market.credit_curve))
        }
        other => Err(mismatch(model, other)),
    }
}

fn price_premium_leg(model: ModelKind, instrument: &Instrument, market: &CreditMarket) -> CreditResult<f64> {
    match instrument {
        Instrument::PremiumLeg { cds, coupon } => Ok(coupon
            * model
                .pricer()
                .annuity(cds, &market.yield_curve, &market.credit_curve, PriceType::Clean)),
        other => Err(mismatch(model, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cds::CdsAnalyticBuilder;
    use approx::assert_relative_eq;
    use tenor_core::types::Date;

    fn market() -> CreditMarket {
        CreditMarket::new(
            YieldCurve::new(vec![1.0, 5.0], vec![0.01, 0.02]).unwrap(),
            CreditCurve::from_forward_hazards(vec![1.0, 5.0], vec![0.01, 0.02]).unwrap(),
        )
    }

    fn cds() -> CdsAnalytic {
        let trade = Date::from_ymd(2013, 6, 4).unwrap();
        CdsAnalyticBuilder::new(trade)
            .standard(Date::from_ymd(2018, 6, 20).unwrap())
            .unwrap()
    }

    #[test]
    fn test_standard_table_is_complete() {
        let table = PricingTable::standard();
        assert_eq!(table.len(), 9);
        for instrument in InstrumentKind::ALL {
            for model in ModelKind::ALL {
                assert!(table.supports(instrument, model));
            }
        }
    }

    #[test]
    fn test_legs_make_up_the_swap() {
        let table = PricingTable::standard();
        let market = market();
        for model in ModelKind::ALL {
            let swap = table
                .price(&Instrument::CreditDefaultSwap { cds: cds(), coupon: 0.01 }, model, &market)
                .unwrap();
            let protection = table.price(&Instrument::ProtectionLeg { cds: cds() }, model, &market).unwrap();
            let premium = table
                .price(&Instrument::PremiumLeg { cds: cds(), coupon: 0.01 }, model, &market)
                .unwrap();
            assert_relative_eq!(swap, protection - premium, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_models_differ_only_in_premium() {
        let table = PricingTable::standard();
        let market = market();
        let leg = Instrument::ProtectionLeg { cds: cds() };
        let premium = Instrument::PremiumLeg { cds: cds(), coupon: 0.01 };

        let isda = table.price(&leg, ModelKind::IsdaStandard, &market).unwrap();
        let markit = table.price(&leg, ModelKind::MarkitFix, &market).unwrap();
        assert_eq!(isda, markit);

        let isda = table.price(&premium, ModelKind::IsdaStandard, &market).unwrap();
        let markit = table.price(&premium, ModelKind::MarkitFix, &market).unwrap();
        assert!(isda > markit);
    }

    #[test]
    fn test_unsupported_pair() {
        let mut table = PricingTable::new();
        assert!(table.is_empty());
        let market = market();
        let swap = Instrument::CreditDefaultSwap { cds: cds(), coupon: 0.01 };

        let err = table.price(&swap, ModelKind::Correct, &market).unwrap_err();
        assert!(matches!(err, CreditError::UnsupportedPricing { .. }));
        assert_eq!(
            err.to_string(),
            "No pricing function for credit default swap under the correct accrual model"
        );

        assert!(table
            .register(InstrumentKind::CreditDefaultSwap, ModelKind::Correct, |_, _| Ok(1.0))
            .is_none());
        assert_eq!(table.price(&swap, ModelKind::Correct, &market).unwrap(), 1.0);
    }

    #[test]
    fn test_mismatched_registration() {
        let mut table = PricingTable::new();
        table.register(InstrumentKind::PremiumLeg, ModelKind::IsdaStandard, |i, m| {
            price_cds(ModelKind::IsdaStandard, i, m)
        });
        let premium = Instrument::PremiumLeg { cds: cds(), coupon: 0.01 };
        let err = table.price(&premium, ModelKind::IsdaStandard, &market()).unwrap_err();
        assert!(matches!(err, CreditError::UnsupportedPricing { .. }));
    }
}
