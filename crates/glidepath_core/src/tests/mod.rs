//! Integration tests for the cohort backtesting engine
//!
//! Tests are organized by topic:
//! - `returns` - Historical series construction, windowing, cohort enumeration
//! - `portfolio` - Bucket ordering, access rules, growth, windfall conversion
//! - `strategies` - The four withdrawal policies and the global clamp
//! - `engine` - Full backtest runs, failure semantics, determinism
//! - `aggregate` - Success rate and percentile reduction

mod aggregate;

use crate::model::{HistoricalReturnSeries, PlanConfig, YearlyReturn};

/// A series where every year earns the same real equity and bond return.
pub(crate) fn flat_series(
    start_year: i16,
    years: usize,
    equity: f64,
    bond: f64,
) -> HistoricalReturnSeries {
    HistoricalReturnSeries::new(
        (0..years)
            .map(|i| YearlyReturn {
                year: start_year + i as i16,
                equity,
                bond,
            })
            .collect(),
    )
    .unwrap()
}

/// A liquid-only plan with a 30-year horizon and no spending bounds,
/// the base case most engine tests perturb.
pub(crate) fn base_config() -> PlanConfig {
    PlanConfig {
        liquid_assets: 1_000_000.0,
        current_age: 40,
        death_age: 70,
        retirement_access_age: 60,
        stock_alloc_pct: 100.0,
        ..Default::default()
    }
}
