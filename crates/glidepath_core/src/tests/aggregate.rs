//! Tests for success-rate and percentile reduction.

use crate::aggregate::{aggregate, percentile};
use crate::error::AggregateError;
use crate::model::{CohortResult, YearRecord};

fn record(total_wealth: f64, depleted: bool) -> YearRecord {
    YearRecord {
        calendar_year: 1950,
        age: 40,
        withdrawal: 40_000.0,
        liquid_balance: total_wealth,
        retirement_balance: 0.0,
        private_balance: 0.0,
        total_wealth,
        depleted,
    }
}

/// A successful cohort holding constant wealth for `years` years.
fn surviving_cohort(start_year: i16, wealth: f64, years: usize) -> CohortResult {
    CohortResult {
        start_year,
        success: true,
        ending_wealth: wealth,
        years: vec![record(wealth, false); years],
    }
}

/// A cohort that depletes after `years_survived` years.
fn failed_cohort(start_year: i16, years_survived: usize) -> CohortResult {
    let mut years = vec![record(100_000.0, false); years_survived];
    years.push(record(0.0, true));
    CohortResult {
        start_year,
        success: false,
        ending_wealth: 0.0,
        years,
    }
}

#[test]
fn test_empty_result_set_rejected() {
    assert_eq!(aggregate(&[]), Err(AggregateError::EmptyResultSet));
}

#[test]
fn test_success_rate_counts_fraction_of_survivors() {
    let results = vec![
        surviving_cohort(1950, 500_000.0, 10),
        surviving_cohort(1951, 300_000.0, 10),
        failed_cohort(1952, 4),
        failed_cohort(1953, 7),
    ];

    let stats = aggregate(&results).unwrap();
    assert_eq!(stats.success_rate, 0.5);
}

#[test]
fn test_failed_cohorts_contribute_zero_not_missing() {
    // One cohort fails immediately; the other two hold steady. The
    // failed cohort must stay in the denominator as a zero, dragging the
    // 10th percentile down for the whole horizon.
    let results = vec![
        failed_cohort(1950, 0),
        surviving_cohort(1951, 400_000.0, 10),
        surviving_cohort(1952, 400_000.0, 10),
    ];

    let stats = aggregate(&results).unwrap();
    assert_eq!(stats.wealth_percentiles.len(), 10);

    for (year_index, p) in stats.wealth_percentiles.iter().enumerate() {
        // Samples are always [0, 400k, 400k]
        assert!(
            p.p10 < 400_000.0,
            "year {year_index}: failed cohort missing from the denominator"
        );
        assert_eq!(p.p50, 400_000.0);
        assert_eq!(p.p90, 400_000.0);
    }
}

#[test]
fn test_median_ending_wealth() {
    let results = vec![
        surviving_cohort(1950, 100_000.0, 5),
        surviving_cohort(1951, 300_000.0, 5),
        surviving_cohort(1952, 900_000.0, 5),
    ];

    let stats = aggregate(&results).unwrap();
    assert_eq!(stats.median_ending_wealth, 300_000.0);
    assert_eq!(stats.min_ending_wealth, 100_000.0);
    assert_eq!(stats.max_ending_wealth, 900_000.0);
}

#[test]
fn test_median_annual_withdrawal() {
    let results = vec![surviving_cohort(1950, 500_000.0, 10)];
    let stats = aggregate(&results).unwrap();
    assert_eq!(stats.median_annual_withdrawal, 40_000.0);
}

#[test]
fn test_single_cohort_percentiles_collapse() {
    let results = vec![surviving_cohort(1950, 250_000.0, 3)];
    let stats = aggregate(&results).unwrap();

    for p in &stats.wealth_percentiles {
        assert_eq!(p.p10, 250_000.0);
        assert_eq!(p.p50, 250_000.0);
        assert_eq!(p.p90, 250_000.0);
    }
}

#[test]
fn test_percentile_interpolates_between_ranks() {
    let sorted = [0.0, 100.0, 200.0, 300.0, 400.0];

    assert_eq!(percentile(&sorted, 0.0), 0.0);
    assert_eq!(percentile(&sorted, 0.5), 200.0);
    assert_eq!(percentile(&sorted, 1.0), 400.0);
    // 10th percentile of 5 samples: rank 0.4 -> between 0 and 100
    assert!((percentile(&sorted, 0.10) - 40.0).abs() < 1e-12);
}

#[test]
fn test_percentile_edge_cases() {
    assert_eq!(percentile(&[], 0.5), 0.0);
    assert_eq!(percentile(&[42.0], 0.1), 42.0);
    assert_eq!(percentile(&[42.0], 0.9), 42.0);
}
