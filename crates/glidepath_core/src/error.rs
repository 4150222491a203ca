use std::fmt;

/// Errors detected while validating a plan configuration.
///
/// All of these are rejected before any cohort is simulated; a backtest
/// never produces partial statistics from a bad configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `death_age` must be strictly greater than `current_age`
    DeathAgeNotAfterCurrentAge { current_age: u8, death_age: u8 },
    /// `min_spend` must not exceed `max_spend`
    MinSpendExceedsMaxSpend { min_spend: f64, max_spend: f64 },
    /// A balance or spending bound was negative
    NegativeAmount { field: &'static str, value: f64 },
    /// `retirement_access_age` must lie within `[current_age, death_age]`
    AccessAgeOutOfRange {
        retirement_access_age: u8,
        current_age: u8,
        death_age: u8,
    },
    /// `stock_alloc_pct` must lie within `[0, 100]`
    AllocationOutOfRange { stock_alloc_pct: f64 },
    /// `flexible_floor_pct` must lie within `[0, 1]`
    FlexibleFloorOutOfRange { flexible_floor_pct: f64 },
    /// A strategy parameter was out of its valid range
    StrategyParameterOutOfRange { name: &'static str, value: f64 },
    /// The spending schedule does not cover the simulation horizon
    SpendingScheduleTooShort {
        required_years: usize,
        available_years: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DeathAgeNotAfterCurrentAge {
                current_age,
                death_age,
            } => {
                write!(
                    f,
                    "death age {death_age} must be greater than current age {current_age}"
                )
            }
            ConfigError::MinSpendExceedsMaxSpend {
                min_spend,
                max_spend,
            } => {
                write!(f, "min spend {min_spend} exceeds max spend {max_spend}")
            }
            ConfigError::NegativeAmount { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            ConfigError::AccessAgeOutOfRange {
                retirement_access_age,
                current_age,
                death_age,
            } => {
                write!(
                    f,
                    "retirement access age {retirement_access_age} outside \
                     [{current_age}, {death_age}]"
                )
            }
            ConfigError::AllocationOutOfRange { stock_alloc_pct } => {
                write!(f, "stock allocation {stock_alloc_pct}% outside [0, 100]")
            }
            ConfigError::FlexibleFloorOutOfRange { flexible_floor_pct } => {
                write!(f, "flexible floor {flexible_floor_pct} outside [0, 1]")
            }
            ConfigError::StrategyParameterOutOfRange { name, value } => {
                write!(f, "strategy parameter {name} out of range: {value}")
            }
            ConfigError::SpendingScheduleTooShort {
                required_years,
                available_years,
            } => {
                write!(
                    f,
                    "spending schedule covers {available_years} years but the \
                     horizon requires {required_years}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors related to the historical return series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// A series must contain at least one observation
    Empty,
    /// Observation years must be strictly increasing with no gaps
    NonContiguousYears { expected: i16, found: i16 },
    /// The requested window extends past the available history
    InsufficientHistory {
        start_year: i16,
        requested_years: usize,
        available_years: usize,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "historical return series is empty"),
            SeriesError::NonContiguousYears { expected, found } => {
                write!(
                    f,
                    "historical return series is not contiguous: expected year \
                     {expected}, found {found}"
                )
            }
            SeriesError::InsufficientHistory {
                start_year,
                requested_years,
                available_years,
            } => {
                write!(
                    f,
                    "insufficient history: {requested_years} years requested from \
                     {start_year}, {available_years} available"
                )
            }
        }
    }
}

impl std::error::Error for SeriesError {}

/// Errors that abort a whole backtest run.
///
/// Per-cohort depletion is deliberately not represented here; a depleted
/// cohort is a normal `Failed` outcome and feeds the success-rate statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum BacktestError {
    Config(ConfigError),
    History(SeriesError),
}

impl fmt::Display for BacktestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacktestError::Config(e) => write!(f, "{e}"),
            BacktestError::History(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BacktestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BacktestError::Config(e) => Some(e),
            BacktestError::History(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BacktestError {
    fn from(e: ConfigError) -> Self {
        BacktestError::Config(e)
    }
}

impl From<SeriesError> for BacktestError {
    fn from(e: SeriesError) -> Self {
        BacktestError::History(e)
    }
}

/// Errors from reducing cohort results into aggregate statistics.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// Aggregation was requested on zero cohort results
    EmptyResultSet,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::EmptyResultSet => {
                write!(f, "no cohort results to aggregate")
            }
        }
    }
}

impl std::error::Error for AggregateError {}
