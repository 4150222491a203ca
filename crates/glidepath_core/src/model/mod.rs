mod config;
mod results;
mod returns;
mod scenario;
mod schedule;

pub use config::{IncomeStream, PlanConfig, StrategyKind, WindfallConfig};
pub use results::{AggregateStats, BacktestResult, CohortResult, WealthPercentiles, YearRecord};
pub use returns::{HistoricalReturnSeries, ViableStartYears, YearlyReturn};
pub use scenario::Scenario;
pub use schedule::SpendingSchedule;
