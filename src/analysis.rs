// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Interpretation of raw measurement counts.
//!
//! Converts bit-pattern counts into integer counts, computes the normalized
//! spread quality metric, and partitions outcomes into in-range and
//! out-of-range relative to the requested outcome count.

use std::collections::BTreeMap;

use crate::backend::MeasurementCounts;
use crate::error::AnalysisError;

/// Occurrence counts keyed by the integer value of each bit pattern.
///
/// A `BTreeMap` keeps iteration (and therefore display and candidate
/// ordering) deterministic.
pub type IntegerCounts = BTreeMap<u64, u32>;

/// Distribution statistics over all observed occurrence counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadStats {
    /// Mean occurrence count.
    pub mean: f64,
    /// Population standard deviation of the occurrence counts.
    pub std_dev: f64,
    /// `std_dev / mean`, rounded to 9 decimal places. Zero for a perfectly
    /// uniform sample.
    pub normalized_spread: f64,
}

/// Result of analyzing one execution.
#[derive(Debug, Clone)]
pub struct OutcomeAnalysis {
    /// Every observed outcome, as integers.
    pub counts: IntegerCounts,
    /// Spread statistics over every observed outcome (in-range or not).
    pub stats: SpreadStats,
    /// The sub-map of `counts` whose keys lie in `[0, num_outcomes - 1]`.
    pub valid: IntegerCounts,
}

/// Analyze the measurement counts of one execution.
///
/// Bit-pattern keys are parsed as big-endian binary. The spread metric is
/// computed over all observed outcomes; the `valid` partition drops patterns
/// `>= num_outcomes` (possible whenever `num_outcomes` is not a power of
/// two). Fails with [`AnalysisError::NoValidOutcomes`] when the filter
/// leaves nothing to select from.
pub fn analyze(
    result: &MeasurementCounts,
    num_outcomes: u64,
) -> Result<OutcomeAnalysis, AnalysisError> {
    let counts = to_integer_counts(result)?;

    let occurrences: Vec<u32> = counts.values().copied().collect();
    let stats = spread_stats(&occurrences)?;

    let valid: IntegerCounts = counts
        .range(..num_outcomes)
        .map(|(&value, &count)| (value, count))
        .collect();
    if valid.is_empty() {
        return Err(AnalysisError::NoValidOutcomes { num_outcomes });
    }

    Ok(OutcomeAnalysis {
        counts,
        stats,
        valid,
    })
}

/// Parse bit-pattern keys into integer keys, big-endian.
///
/// Patterns that collapse to the same integer (a width violation by the
/// backend) have their counts accumulated rather than dropped.
pub fn to_integer_counts(result: &MeasurementCounts) -> Result<IntegerCounts, AnalysisError> {
    let mut counts = IntegerCounts::new();
    for (bits, &occurrence) in &result.bitstring_counts {
        let value = u64::from_str_radix(bits, 2)
            .map_err(|_| AnalysisError::MalformedBitPattern(bits.clone()))?;
        *counts.entry(value).or_insert(0) += occurrence;
    }
    Ok(counts)
}

/// Population standard deviation over mean, rounded to 9 decimal places.
///
/// Fails with [`AnalysisError::DegenerateDistribution`] when the mean is
/// zero (no observations, or all-zero counts) — a well-behaved backend only
/// reports observed patterns, so this indicates a contract breach.
pub fn spread_stats(occurrences: &[u32]) -> Result<SpreadStats, AnalysisError> {
    if occurrences.is_empty() {
        return Err(AnalysisError::DegenerateDistribution);
    }

    let n = occurrences.len() as f64;
    let mean = occurrences.iter().map(|&x| x as f64).sum::<f64>() / n;
    if mean == 0.0 {
        return Err(AnalysisError::DegenerateDistribution);
    }

    let variance = occurrences
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    Ok(SpreadStats {
        mean,
        std_dev,
        normalized_spread: round_to_9(std_dev / mean),
    })
}

fn round_to_9(x: f64) -> f64 {
    (x * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_counts_have_zero_spread() {
        let result =
            MeasurementCounts::from_pairs(&[("000", 25), ("001", 25), ("010", 25), ("011", 25)]);
        let analysis = analyze(&result, 4).unwrap();
        assert_eq!(analysis.stats.normalized_spread, 0.0);
        assert_eq!(analysis.stats.mean, 25.0);
    }

    #[test]
    fn test_big_endian_integer_conversion() {
        let result = MeasurementCounts::from_pairs(&[("110", 10), ("001", 20), ("000", 5)]);
        let counts = to_integer_counts(&result).unwrap();
        assert_eq!(counts[&6], 10);
        assert_eq!(counts[&1], 20);
        assert_eq!(counts[&0], 5);
    }

    #[test]
    fn test_width_violating_patterns_accumulate() {
        let result = MeasurementCounts::from_pairs(&[("01", 10), ("1", 15)]);
        let counts = to_integer_counts(&result).unwrap();
        assert_eq!(counts[&1], 25);
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let result = MeasurementCounts::from_pairs(&[("0x2", 10)]);
        let err = analyze(&result, 4).unwrap_err();
        assert_eq!(err, AnalysisError::MalformedBitPattern("0x2".into()));
    }

    #[test]
    fn test_out_of_range_patterns_excluded_from_valid() {
        // num_outcomes = 5 needs 3 qubits; 5, 6, 7 are measurable but invalid.
        let result = MeasurementCounts::from_pairs(&[
            ("000", 10),
            ("100", 20),
            ("101", 30),
            ("110", 15),
            ("111", 25),
        ]);
        let analysis = analyze(&result, 5).unwrap();
        assert_eq!(
            analysis.valid.keys().copied().collect::<Vec<_>>(),
            vec![0, 4]
        );
        // The spread metric still covers every observed outcome.
        assert_eq!(analysis.counts.len(), 5);
    }

    #[test]
    fn test_no_valid_outcomes() {
        let result = MeasurementCounts::from_pairs(&[("11", 100)]);
        let err = analyze(&result, 3).unwrap_err();
        assert_eq!(err, AnalysisError::NoValidOutcomes { num_outcomes: 3 });
    }

    #[test]
    fn test_empty_result_is_degenerate() {
        let result = MeasurementCounts::from_pairs(&[]);
        let err = analyze(&result, 4).unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateDistribution);
    }

    #[test]
    fn test_zero_mean_is_degenerate() {
        let err = spread_stats(&[0, 0, 0]).unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateDistribution);
    }

    #[test]
    fn test_spread_value() {
        // Counts 30, 20, 30, 20: mean 25, population std dev 5.
        let stats = spread_stats(&[30, 20, 30, 20]).unwrap();
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.std_dev, 5.0);
        assert_eq!(stats.normalized_spread, 0.2);
    }

    #[test]
    fn test_spread_invariant_under_uniform_scaling() {
        let base = [40u32, 10, 10, 10];
        let scaled: Vec<u32> = base.iter().map(|&x| x * 7).collect();
        let a = spread_stats(&base).unwrap();
        let b = spread_stats(&scaled).unwrap();
        assert_eq!(a.normalized_spread, b.normalized_spread);
    }

    #[test]
    fn test_spread_rounded_to_nine_places() {
        // Counts 1, 2: mean 1.5, std dev 0.5, ratio 1/3.
        let stats = spread_stats(&[1, 2]).unwrap();
        assert_eq!(stats.normalized_spread, 0.333333333);
    }

    #[test]
    fn test_single_outcome_spread_is_zero() {
        let stats = spread_stats(&[100]).unwrap();
        assert_eq!(stats.normalized_spread, 0.0);
    }
}
