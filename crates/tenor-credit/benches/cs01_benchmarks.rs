//! Benchmarks for credit curve calibration and CS01.
//!
//! Run with: cargo bench -p tenor-credit

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tenor_core::types::{Date, Period};
use tenor_credit::prelude::*;
use tenor_curves::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn trade_date() -> Date {
    Date::from_ymd(2013, 6, 4).unwrap()
}

fn create_yield_curve() -> YieldCurve {
    let instruments = vec![
        YieldCurveInstrument::money_market(Period::months(1), 0.00194),
        YieldCurveInstrument::money_market(Period::months(3), 0.002733),
        YieldCurveInstrument::money_market(Period::months(6), 0.004153),
        YieldCurveInstrument::money_market(Period::months(12), 0.006902),
        YieldCurveInstrument::swap(Period::years(2), 0.004575),
        YieldCurveInstrument::swap(Period::years(5), 0.012175),
        YieldCurveInstrument::swap(Period::years(10), 0.023045),
        YieldCurveInstrument::swap(Period::years(30), 0.03202),
    ];
    IsdaYieldCurveBuilder::default().build(trade_date(), &instruments).unwrap()
}

fn create_pillars() -> (Vec<CdsAnalytic>, Vec<CdsQuote>) {
    let years = [2014, 2015, 2016, 2017, 2018, 2019, 2020, 2023, 2028, 2043];
    let spreads = [13.17, 21.35, 30.63, 36.74, 44.49, 53.5, 61.4, 74.2, 74.2, 74.2];
    let maturities: Vec<Date> = years.iter().map(|&y| Date::from_ymd(y, 6, 20).unwrap()).collect();
    let pillars = CdsAnalyticBuilder::new(trade_date())
        .build_many(trade_date(), &maturities)
        .unwrap();
    let quotes = spreads
        .iter()
        .map(|s| CdsQuote::ParSpread { spread: s / 1e4 })
        .collect();
    (pillars, quotes)
}

fn create_trades(count: usize) -> Vec<CdsAnalytic> {
    let maturities = tenor_credit::imm::imm_dates_from(trade_date(), count).unwrap();
    CdsAnalyticBuilder::new(trade_date())
        .build_many(Date::from_ymd(2013, 3, 20).unwrap(), &maturities)
        .unwrap()
}

// =============================================================================
// CALIBRATION
// =============================================================================

fn bench_calibration(c: &mut Criterion) {
    let yc = create_yield_curve();
    let (pillars, quotes) = create_pillars();
    let calibrator = CreditCurveCalibrator::default();

    c.bench_function("calibrate_10_pillars", |b| {
        b.iter(|| calibrator.calibrate_quotes(black_box(&pillars), black_box(&quotes), &yc))
    });
}

// =============================================================================
// CS01
// =============================================================================

fn bench_bucketed_cs01(c: &mut Criterion) {
    let yc = create_yield_curve();
    let (pillars, quotes) = create_pillars();

    let mut group = c.benchmark_group("bucketed_cs01");
    group.sample_size(20);

    for size in &[1usize, 10, 40] {
        let trades = create_trades(*size);
        let coupons = vec![0.01; trades.len()];
        group.throughput(Throughput::Elements(*size as u64));

        for parallel in [false, true] {
            let config = SensitivityConfig {
                parallel,
                ..SensitivityConfig::default()
            };
            let calculator = SpreadSensitivityCalculator::new(CreditCurveCalibrator::default(), config);
            let id = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(id, size), &trades, |b, trades| {
                b.iter(|| calculator.bucketed_cs01_matrix(black_box(trades), &coupons, &pillars, &quotes, &yc))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_calibration, bench_bucketed_cs01);
criterion_main!(benches);
