//! Sign conventions of bump-and-revalue risk on worked portfolios.

use approx::assert_relative_eq;
use pricer_core::market_data::curves::names::{LOGVOL, USD_SOFR};
use pricer_core::market_data::{MarketSnapshot, RateCurve, VolCurve};
use pricer_core::types::time::Date;
use pricer_models::instruments::{
    Bond, Direction, ExerciseStyle, FixedIncomeParams, OptionParams, OptionType, Payoff, Swap,
    Trade, TreeOption,
};
use pricer_pricing::TradePricer;
use pricer_risk::portfolio::{ExecutionMode, PortfolioRunner, PortfolioTotals};
use pricer_risk::scenarios::{RiskEngine, RiskType, ShockConfig, SPOT_SCENARIO_ID};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn flat_market(rate: f64) -> MarketSnapshot {
    let as_of = date(2024, 1, 1);
    let mut curve = RateCurve::new(USD_SOFR);
    curve.add_rate(as_of, rate);
    let mut vol = VolCurve::new(LOGVOL);
    vol.add_vol(as_of, 0.2);
    let mut market = MarketSnapshot::new(as_of);
    market.insert_curve(curve).unwrap();
    market.insert_vol_curve(vol).unwrap();
    market.insert_stock_price("AAPL", 100.0);
    market
}

fn engine() -> RiskEngine {
    RiskEngine::new(
        flat_market(0.04),
        ShockConfig::default().with_curves([USD_SOFR]),
        TradePricer::default(),
    )
    .unwrap()
}

fn bond(direction: Direction) -> Trade {
    let params = FixedIncomeParams::new(
        1_000_000.0,
        0.03,
        0.5,
        date(2024, 1, 1),
        date(2026, 1, 1),
        "USD-GOV-2Y",
        USD_SOFR,
        direction,
    )
    .unwrap();
    Bond::new("B1", params).into()
}

fn swap(direction: Direction) -> Trade {
    let params = FixedIncomeParams::new(
        10_000_000.0,
        0.04,
        0.5,
        date(2024, 1, 1),
        date(2026, 1, 1),
        "USD-SWAP-2Y",
        USD_SOFR,
        direction,
    )
    .unwrap();
    Swap::new("S1", params).into()
}

fn put(exercise: ExerciseStyle) -> Trade {
    let params =
        OptionParams::new(100.0, date(2025, 1, 1), "AAPL", USD_SOFR, LOGVOL, Direction::Long)
            .unwrap();
    TreeOption::new(
        "P1",
        Payoff::vanilla(OptionType::Put, 100.0).unwrap(),
        exercise,
        params,
    )
    .into()
}

// ========================================
// DV01
// ========================================

#[test]
fn test_long_bond_dv01_negative_short_flips() {
    let engine = engine();
    let long = engine
        .sensitivities(RiskType::Dv01, &bond(Direction::Long), false)
        .unwrap()[USD_SOFR];
    let short = engine
        .sensitivities(RiskType::Dv01, &bond(Direction::Short), false)
        .unwrap()[USD_SOFR];

    assert!(long < 0.0, "long dv01 = {}", long);
    assert_relative_eq!(short, -long);
    // Central difference of a ~1.9 year bond on 1M notional
    assert!(long > -250.0 && long < -150.0, "long dv01 = {}", long);
}

#[test]
fn test_dv01_matches_one_sided_bump_to_first_order() {
    let engine = engine();
    let trade = bond(Direction::Long);
    let base = engine.price(&trade).unwrap();
    let up = engine
        .pricer()
        .price(engine.curve_scenarios()[0].up(), &trade)
        .unwrap();
    let dv01 = engine.sensitivities(RiskType::Dv01, &trade, false).unwrap()[USD_SOFR];

    // (up - down) / 2 is one bp of central difference; one-sided is close
    assert_relative_eq!(dv01, up - base, max_relative = 1e-3);
}

#[test]
fn test_payer_swap_gains_when_rates_rise() {
    let engine = engine();
    let pay = engine
        .sensitivities(RiskType::Dv01, &swap(Direction::Pay), true)
        .unwrap()[USD_SOFR];
    let receive = engine
        .sensitivities(RiskType::Dv01, &swap(Direction::Receive), true)
        .unwrap()[USD_SOFR];

    assert!(pay > 0.0);
    assert_relative_eq!(pay, -receive, max_relative = 1e-12);
}

// ========================================
// Vega and delta
// ========================================

#[test]
fn test_long_put_vega_positive_delta_negative() {
    let engine = engine();
    for exercise in [ExerciseStyle::European, ExerciseStyle::American] {
        let trade = put(exercise);
        let vega = engine.sensitivities(RiskType::Vega, &trade, false).unwrap()[LOGVOL];
        let delta = engine.sensitivities(RiskType::Delta, &trade, false).unwrap()[SPOT_SCENARIO_ID];
        assert!(vega > 0.0, "{:?} vega = {}", exercise, vega);
        assert!(delta < 0.0, "{:?} delta = {}", exercise, delta);
    }
}

#[test]
fn test_bond_has_no_vega() {
    let engine = engine();
    let vega = engine
        .sensitivities(RiskType::Vega, &bond(Direction::Long), false)
        .unwrap();
    assert_eq!(vega[LOGVOL], 0.0);
}

// ========================================
// Portfolio
// ========================================

#[test]
fn test_long_short_book_nets_to_zero() {
    let trades = vec![
        bond(Direction::Long),
        bond(Direction::Short),
        swap(Direction::Pay),
        swap(Direction::Receive),
    ];
    let runner = PortfolioRunner::new(engine(), ExecutionMode::Scheduler { workers: 4 });
    let results = runner.run(&trades).unwrap();
    let totals = PortfolioTotals::from_results(&results);

    assert_eq!(totals.trades, 4);
    assert_eq!(totals.failed, 0);
    assert!(totals.pv.abs() < 1e-6);
    assert!(totals.dv01.abs() < 1e-6);
    assert_relative_eq!(results[0].pv, 980_101.706_458, epsilon = 1e-5);
}
