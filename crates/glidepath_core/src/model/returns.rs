//! Historical annual real-return observations.
//!
//! The series is the raw material for cohort enumeration: every start year
//! with a full horizon-length window becomes one simulated cohort. Returns
//! are real (inflation-adjusted); the market-data collaborator is
//! responsible for deflating nominal data, with [`from_nominal`] available
//! for the configured-rate conversion.
//!
//! [`from_nominal`]: HistoricalReturnSeries::from_nominal

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One year's real returns for the two modeled asset classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    pub year: i16,
    /// Real equity return, e.g. `0.07` for +7%
    pub equity: f64,
    /// Real fixed-income return
    pub bond: f64,
}

/// Ordered, contiguous annual real-return observations.
///
/// Immutable after construction. Years are validated to be strictly
/// increasing with no gaps, so windowing is plain slice indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalReturnSeries {
    observations: Vec<YearlyReturn>,
}

impl HistoricalReturnSeries {
    /// Create a series from observations, validating contiguity.
    pub fn new(observations: Vec<YearlyReturn>) -> Result<Self, SeriesError> {
        if observations.is_empty() {
            return Err(SeriesError::Empty);
        }
        for pair in observations.windows(2) {
            let expected = pair[0].year + 1;
            if pair[1].year != expected {
                return Err(SeriesError::NonContiguousYears {
                    expected,
                    found: pair[1].year,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Build a series from an equity-only history plus a flat bond
    /// assumption, the common case when the data source only covers a
    /// stock index.
    pub fn from_equity_returns(
        start_year: i16,
        equity: &[f64],
        fixed_bond_rate: f64,
    ) -> Result<Self, SeriesError> {
        Self::new(
            equity
                .iter()
                .enumerate()
                .map(|(i, &e)| YearlyReturn {
                    year: start_year + i as i16,
                    equity: e,
                    bond: fixed_bond_rate,
                })
                .collect(),
        )
    }

    /// Deflate nominal `(equity, bond)` returns by a constant inflation
    /// rate: `real = (1 + nominal) / (1 + inflation) - 1`.
    ///
    /// Deflating by actual historical inflation instead is the data
    /// provider's job.
    pub fn from_nominal(
        start_year: i16,
        nominal: &[(f64, f64)],
        inflation_rate: f64,
    ) -> Result<Self, SeriesError> {
        let deflate = |r: f64| (1.0 + r) / (1.0 + inflation_rate) - 1.0;
        Self::new(
            nominal
                .iter()
                .enumerate()
                .map(|(i, &(equity, bond))| YearlyReturn {
                    year: start_year + i as i16,
                    equity: deflate(equity),
                    bond: deflate(bond),
                })
                .collect(),
        )
    }

    /// First calendar year in the series.
    #[must_use]
    pub fn first_year(&self) -> i16 {
        self.observations[0].year
    }

    /// Last calendar year in the series.
    #[must_use]
    pub fn last_year(&self) -> i16 {
        self.observations[self.observations.len() - 1].year
    }

    /// Number of years of data available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The `length`-year sub-sequence of returns beginning at `start_year`.
    pub fn window(&self, start_year: i16, length: usize) -> Result<&[YearlyReturn], SeriesError> {
        let insufficient = || SeriesError::InsufficientHistory {
            start_year,
            requested_years: length,
            available_years: if start_year >= self.first_year() && start_year <= self.last_year() {
                (self.last_year() - start_year) as usize + 1
            } else {
                0
            },
        };

        if start_year < self.first_year() {
            return Err(insufficient());
        }
        let offset = (start_year - self.first_year()) as usize;
        self.observations
            .get(offset..offset + length)
            .ok_or_else(insufficient)
    }

    /// All start years for which a full `length`-year window exists.
    ///
    /// Lazy, finite, and restartable (`Clone`); this is the cohort set.
    /// Empty when the series is shorter than `length`.
    #[must_use]
    pub fn viable_start_years(&self, length: usize) -> ViableStartYears {
        let length = length.max(1);
        if length > self.observations.len() {
            // next > last yields an immediately-exhausted iterator
            ViableStartYears {
                next: self.first_year(),
                last: self.first_year() - 1,
            }
        } else {
            ViableStartYears {
                next: self.first_year(),
                last: self.first_year() + (self.observations.len() - length) as i16,
            }
        }
    }

    /// All full `length`-year windows in order of start year.
    pub fn viable_windows(&self, length: usize) -> impl Iterator<Item = &[YearlyReturn]> {
        self.observations.windows(length.max(1))
    }
}

/// Iterator over viable cohort start years. See
/// [`HistoricalReturnSeries::viable_start_years`].
#[derive(Debug, Clone)]
pub struct ViableStartYears {
    next: i16,
    last: i16,
}

impl Iterator for ViableStartYears {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.next > self.last {
            return None;
        }
        let year = self.next;
        self.next += 1;
        Some(year)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last - self.next + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ViableStartYears {}
