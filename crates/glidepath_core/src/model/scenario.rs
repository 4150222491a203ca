//! Named scenario bundles.

use serde::{Deserialize, Serialize};

use super::config::PlanConfig;
use super::schedule::SpendingSchedule;

/// A named plan configuration plus its spending schedule.
///
/// This is the unit the external persistence layer stores in its JSON
/// scenario store and the comparison feature evaluates side by side. The
/// engine itself is stateless between runs; it only defines the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub config: PlanConfig,
    pub schedule: SpendingSchedule,
}

impl Scenario {
    #[must_use]
    pub fn new(name: impl Into<String>, config: PlanConfig, schedule: SpendingSchedule) -> Self {
        Self {
            name: name.into(),
            config,
            schedule,
        }
    }
}
