// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Selection of the winning outcome from in-range counts.
//!
//! The most frequent in-range outcome wins; since the underlying sampling
//! was random, that value is itself a random draw. When several outcomes
//! tie for the maximum, the decision is deferred to a fresh single-shot
//! execution (driven by the orchestrator in [`crate::qrng`]) so the tie is
//! broken with new quantum randomness rather than an arbitrary rule.

use crate::analysis::IntegerCounts;
use crate::backend::MeasurementCounts;
use crate::error::AnalysisError;

/// Outcome of scanning the in-range counts for a maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Exactly one outcome achieved the maximum count.
    Unique(u64),
    /// Several outcomes tied for the maximum, in ascending order.
    Tied(Vec<u64>),
}

/// Find the outcome(s) with the maximum occurrence count.
///
/// Returns `None` for an empty map; the analyzer guarantees a non-empty
/// `valid` partition, so orchestration treats that as
/// [`AnalysisError::NoValidOutcomes`].
pub fn select_most_frequent(valid: &IntegerCounts) -> Option<Selection> {
    let max = valid.values().copied().max()?;
    let candidates: Vec<u64> = valid
        .iter()
        .filter(|&(_, &count)| count == max)
        .map(|(&value, _)| value)
        .collect();

    match candidates.as_slice() {
        [single] => Some(Selection::Unique(*single)),
        _ => Some(Selection::Tied(candidates)),
    }
}

/// Extract the integer outcome of a single-shot execution.
///
/// One shot yields exactly one pattern; if a backend breaches that contract
/// the smallest pattern is taken so the result stays deterministic.
pub fn single_shot_value(counts: &MeasurementCounts) -> Result<u64, AnalysisError> {
    let bits = counts
        .bitstring_counts
        .keys()
        .min()
        .ok_or(AnalysisError::EmptyResult)?;
    u64::from_str_radix(bits, 2).map_err(|_| AnalysisError::MalformedBitPattern(bits.clone()))
}
