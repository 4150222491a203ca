//! Backtest driver.
//!
//! Enumerates every viable historical cohort and runs each one to
//! completion. Cohorts are embarrassingly parallel: each owns its state
//! and only shares the read-only return series, so with the `parallel`
//! feature they are mapped over a rayon pool. Callers wanting early
//! termination (interactive re-runs) should treat the whole `run_backtest`
//! call as the cancelable unit and discard in-flight results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{BacktestError, ConfigError, SeriesError};
use crate::model::{BacktestResult, HistoricalReturnSeries, PlanConfig, SpendingSchedule};
use crate::simulation::simulate_cohort;
use crate::strategy::WithdrawalPolicy;

/// Run the full historical backtest for one plan.
///
/// Validates the configuration and data availability up front; a bad
/// config or short history fails the whole run rather than producing
/// partial statistics. Given identical inputs the result is bit-identical.
pub fn run_backtest(
    config: &PlanConfig,
    schedule: &SpendingSchedule,
    series: &HistoricalReturnSeries,
) -> Result<BacktestResult, BacktestError> {
    config.validate()?;

    let horizon = config.horizon_years();
    if schedule.len() < horizon {
        return Err(ConfigError::SpendingScheduleTooShort {
            required_years: horizon,
            available_years: schedule.len(),
        }
        .into());
    }

    if series.viable_start_years(horizon).len() == 0 {
        return Err(SeriesError::InsufficientHistory {
            start_year: series.first_year(),
            requested_years: horizon,
            available_years: series.len(),
        }
        .into());
    }

    let policy = WithdrawalPolicy::new(config, horizon);

    #[cfg(feature = "parallel")]
    let cohorts = series
        .viable_windows(horizon)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|window| simulate_cohort(config, schedule, window, &policy))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let cohorts = series
        .viable_windows(horizon)
        .map(|window| simulate_cohort(config, schedule, window, &policy))
        .collect();

    Ok(BacktestResult {
        horizon_years: horizon,
        cohorts,
    })
}
