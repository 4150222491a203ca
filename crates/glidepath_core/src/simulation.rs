//! Per-cohort simulation.
//!
//! One cohort replays one historical window year by year: income netting,
//! strategy withdrawal, bucket draw, growth, windfall conversion. The
//! cohort is `Running` until it either survives the full horizon
//! (`Succeeded`) or a withdrawal comes up short (`Failed`, terminal).
//! Withdrawals happen before that year's returns are applied.

use crate::model::{CohortResult, PlanConfig, SpendingSchedule, YearRecord, YearlyReturn};
use crate::portfolio::PortfolioState;
use crate::strategy::{StrategyState, WithdrawalPolicy, bounded_withdrawal};

/// Advance one cohort through its full historical window.
///
/// Pure function of its inputs: every cohort owns its portfolio and
/// strategy state, so cohorts can run in parallel. Within the cohort,
/// years are strictly sequential.
pub fn simulate_cohort(
    config: &PlanConfig,
    schedule: &SpendingSchedule,
    window: &[YearlyReturn],
    policy: &WithdrawalPolicy,
) -> CohortResult {
    let horizon = window.len();
    let start_year = window.first().map_or(0, |obs| obs.year);
    let stock_allocation = config.stock_allocation();

    let mut portfolio = PortfolioState::from_config(config);
    let mut strategy_state = StrategyState::default();
    let mut years = Vec::with_capacity(horizon);

    for (year_index, obs) in window.iter().enumerate() {
        let age = config.current_age + year_index as u8;
        let planned = schedule.planned_spend(year_index);

        let raw = policy.compute_withdrawal(
            &strategy_state,
            portfolio.total_drawable(),
            planned,
            year_index,
            horizon - year_index,
        );
        let target = bounded_withdrawal(config, raw, planned);
        policy.note_withdrawal(&mut strategy_state, target);

        // Income active this year offsets the draw; surplus is saved.
        let income = config.annual_income(year_index);
        let draw = (target - income).max(0.0);
        portfolio.deposit_liquid(income - target);

        let outcome = portfolio.withdraw(draw, age, config.retirement_access_age);
        if outcome.is_short() {
            // First depletion is terminal: one depleted record, then stop.
            portfolio.deplete();
            years.push(YearRecord {
                calendar_year: obs.year,
                age,
                withdrawal: outcome.withdrawn,
                liquid_balance: 0.0,
                retirement_balance: 0.0,
                private_balance: 0.0,
                total_wealth: 0.0,
                depleted: true,
            });
            return CohortResult {
                start_year,
                success: false,
                ending_wealth: 0.0,
                years,
            };
        }

        portfolio.apply_growth(obs.equity, obs.bond, stock_allocation);

        if let Some(windfall) = config.windfall {
            if windfall.year_offset == year_index {
                portfolio.convert_windfall();
            }
        }

        years.push(YearRecord {
            calendar_year: obs.year,
            age,
            withdrawal: outcome.withdrawn,
            liquid_balance: portfolio.liquid,
            retirement_balance: portfolio.retirement,
            private_balance: portfolio.private_value,
            total_wealth: portfolio.total_wealth(),
            depleted: false,
        });
    }

    // Reaching the horizon is success even at exactly zero wealth;
    // exhaustion at the boundary is not failure.
    CohortResult {
        start_year,
        success: true,
        ending_wealth: portfolio.total_wealth(),
        years,
    }
}
