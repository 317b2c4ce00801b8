//! Criterion benchmarks for portfolio risk runs.
//!
//! Benchmarks cover:
//! - Scenario construction for a multi-curve market
//! - Portfolio runs per execution mode with growing trade counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::names::{LOGVOL, SGD_SORA, USD_SOFR};
use pricer_core::market_data::{MarketSnapshot, RateCurve, VolCurve};
use pricer_core::types::time::Date;
use pricer_models::instruments::{
    Bond, Direction, ExerciseStyle, FixedIncomeParams, OptionParams, OptionType, Payoff, Swap,
    Trade, TreeOption,
};
use pricer_pricing::lattice::{LatticeConfig, LatticeModel};
use pricer_pricing::TradePricer;
use pricer_risk::portfolio::{ExecutionMode, PortfolioRunner};
use pricer_risk::scenarios::{RiskEngine, ShockConfig};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn market() -> MarketSnapshot {
    let as_of = date(2024, 1, 1);
    let mut market = MarketSnapshot::new(as_of);
    for (name, base) in [(USD_SOFR, 0.045), (SGD_SORA, 0.03)] {
        let mut curve = RateCurve::new(name);
        for (years, bump) in [(0, 0.0), (1, 0.001), (2, 0.002), (5, 0.004), (10, 0.006)] {
            curve.add_rate(as_of.add_years(years).unwrap(), base + bump);
        }
        market.insert_curve(curve).unwrap();
    }
    let mut vol = VolCurve::new(LOGVOL);
    vol.add_vol(as_of, 0.2);
    vol.add_vol(date(2026, 1, 1), 0.25);
    market.insert_vol_curve(vol).unwrap();
    market.insert_stock_price("AAPL", 190.0);
    market
}

/// Synthetic portfolio cycling through bonds, swaps and lattice options.
fn portfolio(n_trades: usize) -> Vec<Trade> {
    (0..n_trades)
        .map(|i| {
            let id = format!("T{:05}", i);
            let direction = if i % 2 == 0 {
                Direction::Long
            } else {
                Direction::Short
            };
            match i % 3 {
                0 => {
                    let params = FixedIncomeParams::new(
                        1e6,
                        0.03,
                        0.5,
                        date(2024, 1, 1),
                        date(2029, 1, 1),
                        "USD-GOV-5Y",
                        USD_SOFR,
                        direction,
                    )
                    .unwrap();
                    Bond::new(id, params).into()
                }
                1 => {
                    let params = FixedIncomeParams::new(
                        1e7,
                        0.035,
                        0.25,
                        date(2024, 1, 1),
                        date(2027, 1, 1),
                        "SGD-SWAP-3Y",
                        SGD_SORA,
                        if i % 2 == 0 { Direction::Pay } else { Direction::Receive },
                    )
                    .unwrap();
                    Swap::new(id, params).into()
                }
                _ => {
                    let params = OptionParams::new(
                        100.0,
                        date(2025, 6, 30),
                        "AAPL",
                        USD_SOFR,
                        LOGVOL,
                        direction,
                    )
                    .unwrap();
                    TreeOption::new(
                        id,
                        Payoff::vanilla(OptionType::Put, 190.0).unwrap(),
                        ExerciseStyle::American,
                        params,
                    )
                    .into()
                }
            }
        })
        .collect()
}

fn engine() -> RiskEngine {
    let config = LatticeConfig::new(LatticeModel::Crr, 100).unwrap();
    RiskEngine::new(market(), ShockConfig::default(), TradePricer::from_config(config)).unwrap()
}

/// Benchmark scenario construction.
fn bench_engine_construction(c: &mut Criterion) {
    let base = market();
    c.bench_function("risk_engine_new", |b| {
        b.iter(|| {
            RiskEngine::new(
                black_box(base.clone()),
                ShockConfig::default(),
                TradePricer::default(),
            )
            .unwrap()
        })
    });
}

/// Benchmark a full portfolio run per execution mode.
fn bench_portfolio_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_run");
    group.sample_size(10);

    for n_trades in [30, 300] {
        let trades = portfolio(n_trades);
        for mode in [
            ExecutionMode::Sequential,
            ExecutionMode::Rayon,
            ExecutionMode::Scheduler { workers: 4 },
        ] {
            let runner = PortfolioRunner::new(engine(), mode);
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), n_trades),
                &trades,
                |b, trades| b.iter(|| runner.run(black_box(trades)).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_engine_construction, bench_portfolio_run);
criterion_main!(benches);
