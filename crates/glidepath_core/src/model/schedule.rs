//! Annual real-spending schedule.

use serde::{Deserialize, Serialize};

/// Ordered annual real spending amounts, one per simulated year.
///
/// Supplied by the lifecycle collaborator, which derives it from
/// age-dependent life events; the engine treats it as an opaque sequence.
/// Lookups past the end clamp to the final entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSchedule {
    amounts: Vec<f64>,
}

impl SpendingSchedule {
    #[must_use]
    pub fn new(amounts: Vec<f64>) -> Self {
        Self { amounts }
    }

    /// Same real spend every year.
    #[must_use]
    pub fn flat(amount: f64, years: usize) -> Self {
        Self {
            amounts: vec![amount; years],
        }
    }

    /// Planned real spend for the given year offset, clamped to the last
    /// entry past the end of the schedule.
    #[must_use]
    pub fn planned_spend(&self, year_index: usize) -> f64 {
        self.amounts
            .get(year_index)
            .or_else(|| self.amounts.last())
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}
