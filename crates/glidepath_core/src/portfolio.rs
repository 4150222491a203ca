//! Asset buckets and the rules governing which bucket may be drawn from.
//!
//! The withdrawal-source rules are policy, not mechanism: they live in
//! [`DRAW_ORDER`] and [`BucketKind::drawable_at`], and the withdrawal loop
//! just walks the table. Adding a bucket type means extending the table,
//! not the simulator.

use crate::model::PlanConfig;

/// Dollar tolerance below which a withdrawal shortfall is ignored.
const SHORTFALL_TOLERANCE: f64 = 1e-6;

/// The three segregated asset pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    /// Taxable savings, drawable unconditionally
    Liquid,
    /// Tax-advantaged accounts, locked until the access age
    Retirement,
    /// Illiquid private equity, never drawable; converts at the windfall
    Private,
}

impl BucketKind {
    /// Whether this bucket may be drawn from at the given age.
    #[must_use]
    pub fn drawable_at(self, age: u8, access_age: u8) -> bool {
        match self {
            BucketKind::Liquid => true,
            BucketKind::Retirement => age >= access_age,
            BucketKind::Private => false,
        }
    }
}

/// Withdrawal-source ordering: liquid first, then retirement once
/// age-eligible. The private bucket only ever converts, so it has no
/// entry here.
pub const DRAW_ORDER: [BucketKind; 2] = [BucketKind::Liquid, BucketKind::Retirement];

/// What a withdrawal actually produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalOutcome {
    pub requested: f64,
    pub withdrawn: f64,
}

impl WithdrawalOutcome {
    /// True when the eligible buckets could not cover the request.
    /// A shortfall signals depletion.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.withdrawn + SHORTFALL_TOLERANCE < self.requested
    }
}

/// Mutable per-cohort bucket balances.
///
/// Created fresh at cohort start, mutated once per simulated year,
/// discarded at cohort end. Never shared across cohorts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    pub liquid: f64,
    pub retirement: f64,
    pub private_value: f64,
}

impl PortfolioState {
    #[must_use]
    pub fn from_config(config: &PlanConfig) -> Self {
        Self {
            liquid: config.liquid_assets,
            retirement: config.retirement_assets,
            private_value: config.windfall.map_or(0.0, |w| w.value()),
        }
    }

    /// Value the withdrawal strategy can see: everything but the
    /// illiquid private position.
    #[must_use]
    pub fn total_drawable(&self) -> f64 {
        self.liquid + self.retirement
    }

    #[must_use]
    pub fn total_wealth(&self) -> f64 {
        self.liquid + self.retirement + self.private_value
    }

    fn balance_mut(&mut self, bucket: BucketKind) -> &mut f64 {
        match bucket {
            BucketKind::Liquid => &mut self.liquid,
            BucketKind::Retirement => &mut self.retirement,
            BucketKind::Private => &mut self.private_value,
        }
    }

    /// Draw `amount` from the eligible buckets in [`DRAW_ORDER`].
    ///
    /// Returns the actually-withdrawn total, which is less than the
    /// request when every eligible bucket is exhausted. Balances never go
    /// negative.
    pub fn withdraw(&mut self, amount: f64, age: u8, access_age: u8) -> WithdrawalOutcome {
        let requested = amount.max(0.0);
        let mut remaining = requested;

        for bucket in DRAW_ORDER {
            if remaining <= 0.0 {
                break;
            }
            if !bucket.drawable_at(age, access_age) {
                continue;
            }
            let balance = self.balance_mut(bucket);
            let taken = remaining.min(*balance);
            *balance -= taken;
            remaining -= taken;
        }

        WithdrawalOutcome {
            requested,
            withdrawn: requested - remaining,
        }
    }

    /// Apply one year's blended real return to the liquid and retirement
    /// buckets independently. The private position earns nothing until
    /// its liquidity event.
    pub fn apply_growth(&mut self, equity_return: f64, bond_return: f64, stock_allocation: f64) {
        let blended = equity_return * stock_allocation + bond_return * (1.0 - stock_allocation);
        self.liquid *= 1.0 + blended;
        self.retirement *= 1.0 + blended;
    }

    /// Add income surplus to the liquid bucket.
    pub fn deposit_liquid(&mut self, amount: f64) {
        if amount > 0.0 {
            self.liquid += amount;
        }
    }

    /// Convert the private position to liquid assets at its configured
    /// valuation. Called exactly once, in the designated windfall year.
    pub fn convert_windfall(&mut self) {
        self.liquid += self.private_value;
        self.private_value = 0.0;
    }

    /// Zero every bucket. Used once a cohort has failed so its trailing
    /// record reports no phantom wealth.
    pub fn deplete(&mut self) {
        self.liquid = 0.0;
        self.retirement = 0.0;
        self.private_value = 0.0;
    }
}
