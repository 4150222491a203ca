//! Reduction of per-cohort results into aggregate statistics.

use crate::error::AggregateError;
use crate::model::{AggregateStats, CohortResult, WealthPercentiles};

/// Reduce a set of cohort results into success-rate and percentile
/// statistics.
///
/// At each year offset the percentiles are taken across *all* cohorts:
/// a cohort that failed earlier contributes zero wealth, not a missing
/// sample, so the denominator never shrinks mid-horizon.
pub fn aggregate(results: &[CohortResult]) -> Result<AggregateStats, AggregateError> {
    if results.is_empty() {
        return Err(AggregateError::EmptyResultSet);
    }

    let successes = results.iter().filter(|r| r.success).count();
    let horizon = results.iter().map(|r| r.years.len()).max().unwrap_or(0);

    let mut wealth_percentiles = Vec::with_capacity(horizon);
    let mut samples = vec![0.0; results.len()];
    for year_index in 0..horizon {
        for (slot, result) in samples.iter_mut().zip(results) {
            *slot = result.wealth_at(year_index);
        }
        samples.sort_by(f64::total_cmp);
        wealth_percentiles.push(WealthPercentiles {
            p10: percentile(&samples, 0.10),
            p50: percentile(&samples, 0.50),
            p90: percentile(&samples, 0.90),
        });
    }

    let mut ending: Vec<f64> = results.iter().map(|r| r.ending_wealth).collect();
    ending.sort_by(f64::total_cmp);

    let mut withdrawals: Vec<f64> = results
        .iter()
        .flat_map(|r| r.years.iter().map(|y| y.withdrawal))
        .collect();
    withdrawals.sort_by(f64::total_cmp);

    Ok(AggregateStats {
        success_rate: successes as f64 / results.len() as f64,
        wealth_percentiles,
        median_ending_wealth: percentile(&ending, 0.50),
        min_ending_wealth: ending.first().copied().unwrap_or(0.0),
        max_ending_wealth: ending.last().copied().unwrap_or(0.0),
        median_annual_withdrawal: percentile(&withdrawals, 0.50),
    })
}

/// Linear-interpolated percentile over a sorted slice.
///
/// `p` is a fraction in `[0, 1]`. An empty slice yields zero.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = p.clamp(0.0, 1.0) * (len - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                sorted[lo]
            } else {
                let frac = rank - lo as f64;
                sorted[lo] * (1.0 - frac) + sorted[hi] * frac
            }
        }
    }
}
