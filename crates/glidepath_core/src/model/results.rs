//! Backtest results
//!
//! Output types from a run: one trajectory per cohort, plus the reduced
//! aggregate statistics the presentation layer charts (percentile cones,
//! success-rate metrics).

use serde::{Deserialize, Serialize};

/// One simulated year of one cohort.
///
/// Balances are end-of-year, after the withdrawal, growth, and any
/// windfall conversion. They are never negative; a cohort that cannot
/// cover its withdrawal is recorded once with `depleted = true` and its
/// trajectory ends there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Historical calendar year this simulated year replayed
    pub calendar_year: i16,
    pub age: u8,
    /// Actual amount drawn from the portfolio this year
    pub withdrawal: f64,
    pub liquid_balance: f64,
    pub retirement_balance: f64,
    pub private_balance: f64,
    pub total_wealth: f64,
    pub depleted: bool,
}

/// Outcome of one cohort: a full-horizon replay from one historical
/// starting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortResult {
    /// Historical year the replay window begins
    pub start_year: i16,
    /// True when the cohort reached the horizon without depleting its
    /// eligible buckets
    pub success: bool,
    pub ending_wealth: f64,
    /// Year-by-year trajectory, truncated at depletion
    pub years: Vec<YearRecord>,
}

impl CohortResult {
    /// Total wealth at a year offset, zero once the cohort has failed.
    ///
    /// Keeping failed cohorts at zero (rather than absent) preserves the
    /// denominator when percentiles are taken across cohorts.
    #[must_use]
    pub fn wealth_at(&self, year_index: usize) -> f64 {
        self.years
            .get(year_index)
            .map_or(0.0, |record| record.total_wealth)
    }
}

/// All cohort outcomes from one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub horizon_years: usize,
    pub cohorts: Vec<CohortResult>,
}

impl BacktestResult {
    #[must_use]
    pub fn num_cohorts(&self) -> usize {
        self.cohorts.len()
    }

    /// The cohort that started its replay in the given historical year.
    #[must_use]
    pub fn cohort_for(&self, start_year: i16) -> Option<&CohortResult> {
        self.cohorts.iter().find(|c| c.start_year == start_year)
    }
}

/// Wealth percentiles across cohorts at one year offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WealthPercentiles {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Summary statistics reduced from a set of cohort results.
///
/// Recomputed fresh per aggregation call; nothing here is cached across
/// runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Fraction of cohorts that survived the full horizon
    pub success_rate: f64,
    /// Per-year-offset 10th/50th/90th percentile total wealth
    pub wealth_percentiles: Vec<WealthPercentiles>,
    pub median_ending_wealth: f64,
    pub min_ending_wealth: f64,
    pub max_ending_wealth: f64,
    pub median_annual_withdrawal: f64,
}
