//! Historical cohort backtesting for retirement withdrawal plans
//!
//! This crate estimates the probability that a retirement portfolio
//! survives a chosen horizon under real historical market conditions. It
//! replays every viable historical starting year ("cohort") through a
//! multi-bucket portfolio:
//! - Three asset buckets with ordered access rules (liquid first,
//!   retirement accounts after the access age, an illiquid private
//!   position that converts at a designated windfall year)
//! - Four adaptive withdrawal strategies (constant dollar, percent of
//!   portfolio, VPW, Guyton-Klinger guardrails)
//! - Flexible-spending floors and global min/max withdrawal bounds
//! - Success-rate and percentile wealth-trajectory aggregation
//!
//! # Example
//!
//! ```ignore
//! use glidepath_core::model::{HistoricalReturnSeries, PlanConfig, SpendingSchedule, StrategyKind};
//! use glidepath_core::{aggregate, run_backtest};
//!
//! let config = PlanConfig {
//!     liquid_assets: 900_000.0,
//!     retirement_assets: 600_000.0,
//!     current_age: 45,
//!     death_age: 95,
//!     strategy: StrategyKind::PercentPortfolio { rate: 0.04 },
//!     ..Default::default()
//! };
//! let schedule = SpendingSchedule::flat(55_000.0, config.horizon_years());
//! let series = HistoricalReturnSeries::from_equity_returns(1928, &equity_history, 0.02)?;
//!
//! let result = run_backtest(&config, &schedule, &series)?;
//! let stats = aggregate(&result.cohorts)?;
//! println!("success rate: {:.1}%", stats.success_rate * 100.0);
//! ```
//!
//! The engine is deterministic: identical inputs produce bit-identical
//! results. Market data acquisition, the spending-schedule lifecycle
//! model, tax computation, and presentation are external collaborators.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod simulation;
pub mod strategy;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::aggregate;
pub use engine::run_backtest;
pub use error::{AggregateError, BacktestError, ConfigError, SeriesError};
