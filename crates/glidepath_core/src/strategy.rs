//! Withdrawal strategies.
//!
//! The four policies form a closed sum type. [`StrategyKind`] is the
//! serializable configuration; [`WithdrawalPolicy::new`] compiles it once
//! per run (VPW precomputes its rate table, Guyton-Klinger its guardrail
//! thresholds) so the per-year call is cheap and allocation-free.
//!
//! All amounts are real. Every strategy output passes through
//! [`bounded_withdrawal`] as a final step: the global min/max clamp, then
//! the spending floor.

use crate::model::{PlanConfig, StrategyKind};

/// Per-cohort mutable strategy memory.
///
/// Only Guyton-Klinger reads it; the other variants are pure functions of
/// the current balance and year.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyState {
    /// Withdrawal taken the previous simulated year, real dollars.
    /// In constant purchasing power the inflation-adjusted carryforward
    /// is the prior amount unchanged.
    pub last_withdrawal: Option<f64>,
}

/// VPW withdrawal rates keyed by years remaining.
///
/// The rate is the annuity exhaustion factor `r / (1 - (1+r)^-n)` at the
/// assumed real return, capped at 100%. It is monotone non-decreasing as
/// the remaining horizon shrinks and exactly 100% with one year left, so
/// the schedule spends the portfolio down to zero at the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct VpwSchedule {
    /// Index 0 holds the rate for one year remaining.
    rates: Vec<f64>,
}

impl VpwSchedule {
    #[must_use]
    pub fn new(assumed_real_return: f64, horizon: usize) -> Self {
        let rates = (1..=horizon.max(1))
            .map(|n| annuity_rate(assumed_real_return, n).min(1.0))
            .collect();
        Self { rates }
    }

    /// Withdrawal rate for the given remaining horizon.
    #[must_use]
    pub fn rate_for(&self, years_remaining: usize) -> f64 {
        let n = years_remaining.max(1);
        match self.rates.get(n - 1) {
            Some(&rate) => rate,
            // Beyond the precomputed table, keep the longest-horizon rate
            None => self.rates[self.rates.len() - 1],
        }
    }
}

/// Payment rate that exhausts one unit over `n` years at real return `r`.
fn annuity_rate(r: f64, n: usize) -> f64 {
    if r.abs() < 1e-12 {
        1.0 / n as f64
    } else {
        r / (1.0 - (1.0 + r).powi(-(n as i32)))
    }
}

/// A [`StrategyKind`] compiled for one run.
#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawalPolicy {
    ConstantDollar,
    PercentPortfolio {
        rate: f64,
    },
    Vpw(VpwSchedule),
    GuytonKlinger {
        /// Withdrawal rate above which the capital-preservation cut fires
        upper_threshold: f64,
        /// Withdrawal rate below which the prosperity raise fires
        lower_threshold: f64,
        adjustment_pct: f64,
    },
}

impl WithdrawalPolicy {
    #[must_use]
    pub fn new(config: &PlanConfig, horizon: usize) -> Self {
        match config.strategy {
            StrategyKind::ConstantDollar => WithdrawalPolicy::ConstantDollar,
            StrategyKind::PercentPortfolio { rate } => WithdrawalPolicy::PercentPortfolio { rate },
            StrategyKind::Vpw {
                assumed_real_return,
            } => WithdrawalPolicy::Vpw(VpwSchedule::new(assumed_real_return, horizon)),
            StrategyKind::GuytonKlinger {
                initial_rate,
                guardrail_band,
                adjustment_pct,
            } => WithdrawalPolicy::GuytonKlinger {
                upper_threshold: initial_rate * (1.0 + guardrail_band),
                lower_threshold: initial_rate * (1.0 - guardrail_band),
                adjustment_pct,
            },
        }
    }

    /// Compute this year's withdrawal before the global clamp.
    ///
    /// `drawable_value` excludes the illiquid private position. A zero or
    /// negative portfolio yields zero for the balance-driven variants
    /// rather than dividing by zero.
    #[must_use]
    pub fn compute_withdrawal(
        &self,
        state: &StrategyState,
        drawable_value: f64,
        planned_spend: f64,
        year_index: usize,
        horizon_remaining: usize,
    ) -> f64 {
        match self {
            WithdrawalPolicy::ConstantDollar => planned_spend,
            WithdrawalPolicy::PercentPortfolio { rate } => (drawable_value * rate).max(0.0),
            WithdrawalPolicy::Vpw(schedule) => {
                (drawable_value * schedule.rate_for(horizon_remaining)).max(0.0)
            }
            WithdrawalPolicy::GuytonKlinger {
                upper_threshold,
                lower_threshold,
                adjustment_pct,
            } => {
                if drawable_value <= 0.0 {
                    return 0.0;
                }
                // First year starts from the planned spend; afterwards
                // from the prior year's (real) withdrawal.
                let proposed = if year_index == 0 {
                    planned_spend
                } else {
                    state.last_withdrawal.unwrap_or(planned_spend)
                };
                let current_rate = proposed / drawable_value;

                // At most one guardrail fires per year; cut and raise are
                // mutually exclusive.
                if current_rate > *upper_threshold {
                    proposed * (1.0 - adjustment_pct)
                } else if current_rate < *lower_threshold {
                    proposed * (1.0 + adjustment_pct)
                } else {
                    proposed
                }
            }
        }
    }

    /// Record the withdrawal the simulator settled on, after clamping,
    /// so guardrail state tracks what was actually spent.
    pub fn note_withdrawal(&self, state: &mut StrategyState, amount: f64) {
        state.last_withdrawal = Some(amount);
    }
}

/// The global bound applied after strategy-specific computation: clamp to
/// `[min_spend, max_spend]`, then enforce the spending floor.
///
/// The floor is the full planned spend, or `planned_spend *
/// flexible_floor_pct` when flexible spending lets the household cut
/// discretionary spend in lean years. The floor is applied last, so a
/// required spend always wins over the strategy's preference.
#[must_use]
pub fn bounded_withdrawal(config: &PlanConfig, raw: f64, planned_spend: f64) -> f64 {
    let bounded = raw.clamp(config.min_spend, config.max_spend);
    let floor = if config.flexible_spending {
        planned_spend * config.flexible_floor_pct
    } else {
        planned_spend
    };
    bounded.max(floor)
}
