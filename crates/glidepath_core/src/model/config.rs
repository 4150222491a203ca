//! Plan configuration
//!
//! `PlanConfig` bundles everything a backtest run needs to know about the
//! household: bucket balances, allocation, ages, the withdrawal strategy
//! and its spending bounds. It is created once per run, validated up
//! front, and passed by reference everywhere; there is no ambient
//! "current settings" state.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The withdrawal policy to backtest, with variant-specific parameters.
///
/// A closed set: each variant carries only the configuration it needs, and
/// the engine compiles it into a runtime
/// [`WithdrawalPolicy`](crate::strategy::WithdrawalPolicy) per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Withdraw the planned real spend every year, regardless of
    /// portfolio performance.
    ConstantDollar,
    /// Withdraw a fixed percentage of the current drawable balance,
    /// recomputed each year.
    PercentPortfolio { rate: f64 },
    /// Variable percentage withdrawal: the rate rises as the remaining
    /// horizon shrinks, reaching 100% in the final year.
    Vpw { assumed_real_return: f64 },
    /// Guyton-Klinger guardrails around the prior year's withdrawal.
    GuytonKlinger {
        /// Withdrawal rate the guardrails are centered on, e.g. `0.04`
        initial_rate: f64,
        /// Band width around the initial rate, e.g. `0.2` for +/-20%
        #[serde(default = "default_guardrail_band")]
        guardrail_band: f64,
        /// Fractional cut/raise applied when a guardrail triggers
        #[serde(default = "default_adjustment_pct")]
        adjustment_pct: f64,
    },
}

fn default_guardrail_band() -> f64 {
    0.20
}

fn default_adjustment_pct() -> f64 {
    0.10
}

impl StrategyKind {
    /// Guyton-Klinger with the conventional 20% band and 10% adjustments.
    #[must_use]
    pub fn guyton_klinger(initial_rate: f64) -> Self {
        StrategyKind::GuytonKlinger {
            initial_rate,
            guardrail_band: default_guardrail_band(),
            adjustment_pct: default_adjustment_pct(),
        }
    }
}

/// An illiquid private-equity position and its designated liquidity event.
///
/// Before the windfall year the position earns no return and cannot be
/// drawn from; in the windfall year it converts to liquid assets at the
/// configured valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindfallConfig {
    pub shares: f64,
    pub price_per_share: f64,
    /// Years after retirement start at which the position converts
    pub year_offset: usize,
}

impl WindfallConfig {
    /// Conversion value at the configured valuation.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.shares * self.price_per_share
    }
}

/// A source of income over a span of plan years.
///
/// Income active in a simulated year offsets that year's withdrawal need;
/// any surplus is deposited into the liquid bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub name: String,
    /// First plan calendar year the stream pays (inclusive)
    pub start_year: i16,
    /// Last plan calendar year the stream pays (inclusive)
    pub end_year: i16,
    pub annual_amount: f64,
}

impl IncomeStream {
    #[must_use]
    pub fn active_in(&self, calendar_year: i16) -> bool {
        self.start_year <= calendar_year && calendar_year <= self.end_year
    }
}

/// Complete configuration for one backtest run. All amounts are real
/// (constant purchasing power).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Taxable liquid savings, drawn first
    pub liquid_assets: f64,
    /// Access-restricted retirement accounts
    pub retirement_assets: f64,
    /// Illiquid private-equity position, if any
    #[serde(default)]
    pub windfall: Option<WindfallConfig>,
    /// Equity share of the liquid and retirement buckets, 0-100
    pub stock_alloc_pct: f64,
    /// Flat real bond return assumption, in percent (e.g. `2.0`)
    pub bond_return_pct: f64,
    /// Inflation rate used by collaborators for nominal/real conversion
    pub inflation_rate: f64,
    pub current_age: u8,
    pub death_age: u8,
    /// Age at which the retirement bucket becomes drawable
    pub retirement_access_age: u8,
    pub strategy: StrategyKind,
    /// Lower bound on every year's withdrawal
    pub min_spend: f64,
    /// Upper bound on every year's withdrawal
    pub max_spend: f64,
    /// Allow spending to drop below the planned amount in shortfall years
    #[serde(default)]
    pub flexible_spending: bool,
    /// Floor as a fraction of planned spend when flexible, e.g. `0.75`
    #[serde(default = "default_flexible_floor")]
    pub flexible_floor_pct: f64,
    /// Plan calendar year the retirement begins; anchors income streams
    pub plan_start_year: i16,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
}

fn default_flexible_floor() -> f64 {
    0.75
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            liquid_assets: 0.0,
            retirement_assets: 0.0,
            windfall: None,
            stock_alloc_pct: 80.0,
            bond_return_pct: 2.0,
            inflation_rate: 0.03,
            current_age: 40,
            death_age: 95,
            retirement_access_age: 60,
            strategy: StrategyKind::ConstantDollar,
            min_spend: 0.0,
            max_spend: f64::MAX,
            flexible_spending: false,
            flexible_floor_pct: default_flexible_floor(),
            plan_start_year: 2025,
            income_streams: Vec::new(),
        }
    }
}

impl PlanConfig {
    /// Number of simulated years: `death_age - current_age`.
    #[must_use]
    pub fn horizon_years(&self) -> usize {
        self.death_age.saturating_sub(self.current_age) as usize
    }

    /// Equity allocation as a fraction in `[0, 1]`.
    #[must_use]
    pub fn stock_allocation(&self) -> f64 {
        self.stock_alloc_pct / 100.0
    }

    /// Flat bond assumption as a fraction, for building return series.
    #[must_use]
    pub fn bond_return(&self) -> f64 {
        self.bond_return_pct / 100.0
    }

    /// Total income from all streams active in the given plan year offset.
    #[must_use]
    pub fn annual_income(&self, year_index: usize) -> f64 {
        let calendar_year = self.plan_start_year + year_index as i16;
        self.income_streams
            .iter()
            .filter(|s| s.active_in(calendar_year))
            .map(|s| s.annual_amount)
            .sum()
    }

    /// Reject invalid configurations before any simulation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.death_age <= self.current_age {
            return Err(ConfigError::DeathAgeNotAfterCurrentAge {
                current_age: self.current_age,
                death_age: self.death_age,
            });
        }
        if self.retirement_access_age < self.current_age
            || self.retirement_access_age > self.death_age
        {
            return Err(ConfigError::AccessAgeOutOfRange {
                retirement_access_age: self.retirement_access_age,
                current_age: self.current_age,
                death_age: self.death_age,
            });
        }

        let non_negative = [
            ("liquid_assets", self.liquid_assets),
            ("retirement_assets", self.retirement_assets),
            ("min_spend", self.min_spend),
            ("max_spend", self.max_spend),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::NegativeAmount { field, value });
            }
        }
        if let Some(windfall) = &self.windfall {
            if windfall.shares < 0.0 {
                return Err(ConfigError::NegativeAmount {
                    field: "windfall.shares",
                    value: windfall.shares,
                });
            }
            if windfall.price_per_share < 0.0 {
                return Err(ConfigError::NegativeAmount {
                    field: "windfall.price_per_share",
                    value: windfall.price_per_share,
                });
            }
        }
        for stream in &self.income_streams {
            if stream.annual_amount < 0.0 {
                return Err(ConfigError::NegativeAmount {
                    field: "income_streams.annual_amount",
                    value: stream.annual_amount,
                });
            }
        }

        if self.min_spend > self.max_spend {
            return Err(ConfigError::MinSpendExceedsMaxSpend {
                min_spend: self.min_spend,
                max_spend: self.max_spend,
            });
        }
        if !(0.0..=100.0).contains(&self.stock_alloc_pct) {
            return Err(ConfigError::AllocationOutOfRange {
                stock_alloc_pct: self.stock_alloc_pct,
            });
        }
        if !(0.0..=1.0).contains(&self.flexible_floor_pct) {
            return Err(ConfigError::FlexibleFloorOutOfRange {
                flexible_floor_pct: self.flexible_floor_pct,
            });
        }

        self.validate_strategy()
    }

    fn validate_strategy(&self) -> Result<(), ConfigError> {
        let out_of_range = |name, value| ConfigError::StrategyParameterOutOfRange { name, value };
        match self.strategy {
            StrategyKind::ConstantDollar => Ok(()),
            StrategyKind::PercentPortfolio { rate } => {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(out_of_range("rate", rate));
                }
                Ok(())
            }
            StrategyKind::Vpw {
                assumed_real_return,
            } => {
                if !assumed_real_return.is_finite() || assumed_real_return <= -1.0 {
                    return Err(out_of_range("assumed_real_return", assumed_real_return));
                }
                Ok(())
            }
            StrategyKind::GuytonKlinger {
                initial_rate,
                guardrail_band,
                adjustment_pct,
            } => {
                if !initial_rate.is_finite() || initial_rate <= 0.0 {
                    return Err(out_of_range("initial_rate", initial_rate));
                }
                if !(0.0..1.0).contains(&guardrail_band) {
                    return Err(out_of_range("guardrail_band", guardrail_band));
                }
                if !(0.0..1.0).contains(&adjustment_pct) {
                    return Err(out_of_range("adjustment_pct", adjustment_pct));
                }
                Ok(())
            }
        }
    }
}
