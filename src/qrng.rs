// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end draw orchestration.
//!
//! Composes spec building, backend execution, counts analysis and tie-break
//! selection into a single "produce one random integer plus quality metric"
//! operation. The call chain is strictly sequential and the backend is
//! invoked at most twice: the main batch, and optionally one single-shot
//! tie-break re-run.

use serde::Serialize;

use crate::analysis;
use crate::backend::QuantumBackend;
use crate::circuit;
use crate::error::{Error, Result};
use crate::observer::{DrawObserver, NullObserver};
use crate::selection::{self, Selection};

/// Final output of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Draw {
    /// The selected random integer.
    pub value: u64,
    /// Normalized spread of the sampled distribution (0.0 = perfectly
    /// uniform).
    pub normalized_spread: f64,
}

/// Produce one random integer in `[0, num_outcomes - 1]` from `shots`
/// trials on `backend`.
///
/// The most frequent in-range outcome wins. A tie for the maximum is broken
/// by one fresh single-shot execution of the same circuit; that value is
/// returned without a range re-check, so on the tie path the result can
/// fall outside the requested range when `num_outcomes` is not a power of
/// two.
///
/// `num_outcomes == 1` is answered as `0` directly — a zero-qubit circuit
/// has nothing to measure, so the backend is never contacted.
pub async fn generate(
    backend: &dyn QuantumBackend,
    num_outcomes: u64,
    shots: u32,
    observer: &dyn DrawObserver,
) -> Result<Draw> {
    if shots == 0 {
        return Err(Error::InvalidArgument("shots must be greater than 0".into()));
    }

    let spec = circuit::build(num_outcomes)?;
    if num_outcomes == 1 {
        return Ok(Draw {
            value: 0,
            normalized_spread: 0.0,
        });
    }
    observer.spec_built(&spec);

    let result = backend.execute(&spec, shots).await?;
    observer.execution_completed(shots, result.distinct_patterns());

    let outcome_analysis = analysis::analyze(&result, num_outcomes)?;
    observer.counts_analyzed(&outcome_analysis);

    let value = match selection::select_most_frequent(&outcome_analysis.valid) {
        Some(Selection::Unique(value)) => value,
        Some(Selection::Tied(candidates)) => {
            observer.tie_detected(&candidates);
            let single = backend.execute(&spec, 1).await?;
            selection::single_shot_value(&single)?
        }
        None => {
            return Err(Error::Analysis(
                crate::error::AnalysisError::NoValidOutcomes { num_outcomes },
            ))
        }
    };

    Ok(Draw {
        value,
        normalized_spread: outcome_analysis.stats.normalized_spread,
    })
}

/// Convenience wrapper: one draw with a single shot and no observer.
pub async fn draw_one(backend: &dyn QuantumBackend, num_outcomes: u64) -> Result<Draw> {
    generate(backend, num_outcomes, 1, &NullObserver).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MeasurementCounts;
    use crate::error::{AnalysisError, BackendError};
    use crate::test_utils::{FailingBackend, ScriptedBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_clear_winner_returned_without_rerun() {
        let backend = ScriptedBackend::new(vec![MeasurementCounts::from_pairs(&[
            ("00", 40),
            ("01", 10),
            ("10", 10),
            ("11", 10),
        ])]);

        let draw = generate(&backend, 4, 70, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 0);
        // The tie-break re-run must not have happened.
        assert_eq!(backend.calls(), vec![70]);
    }

    #[tokio::test]
    async fn test_four_way_tie_resolved_by_single_shot() {
        let backend = ScriptedBackend::new(vec![
            MeasurementCounts::from_pairs(&[("000", 25), ("001", 25), ("010", 25), ("011", 25)]),
            MeasurementCounts::from_pairs(&[("010", 1)]),
        ]);

        let draw = generate(&backend, 4, 100, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 2);
        assert_eq!(draw.normalized_spread, 0.0);
        assert_eq!(backend.calls(), vec![100, 1]);
    }

    #[tokio::test]
    async fn test_two_way_tie_triggers_rerun() {
        let backend = ScriptedBackend::new(vec![
            MeasurementCounts::from_pairs(&[("00", 30), ("01", 20), ("10", 30), ("11", 20)]),
            MeasurementCounts::from_pairs(&[("01", 1)]),
        ]);

        let draw = generate(&backend, 4, 100, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 1);
        assert_eq!(backend.calls(), vec![100, 1]);
    }

    #[tokio::test]
    async fn test_tie_break_value_is_not_range_checked() {
        // Three outcomes on two qubits; the tie-break shot lands on 3.
        let backend = ScriptedBackend::new(vec![
            MeasurementCounts::from_pairs(&[("00", 50), ("01", 50)]),
            MeasurementCounts::from_pairs(&[("11", 1)]),
        ]);

        let draw = generate(&backend, 3, 100, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 3);
    }

    #[tokio::test]
    async fn test_out_of_range_outcomes_never_win_the_batch() {
        // num_outcomes = 5: pattern 101 (= 5) dominates but is invalid.
        let backend = ScriptedBackend::new(vec![MeasurementCounts::from_pairs(&[
            ("101", 60),
            ("100", 25),
            ("000", 15),
        ])]);

        let draw = generate(&backend, 5, 100, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 4);
        assert_eq!(backend.calls(), vec![100]);
    }

    #[tokio::test]
    async fn test_no_valid_outcomes_surfaces() {
        let backend =
            ScriptedBackend::new(vec![MeasurementCounts::from_pairs(&[("11", 100)])]);

        let err = generate(&backend, 3, 100, &NullObserver).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Analysis(AnalysisError::NoValidOutcomes { num_outcomes: 3 })
        ));
    }

    #[tokio::test]
    async fn test_single_outcome_skips_backend() {
        let backend = ScriptedBackend::new(vec![]);

        let draw = generate(&backend, 1, 100, &NullObserver).await.unwrap();
        assert_eq!(draw.value, 0);
        assert_eq!(draw.normalized_spread, 0.0);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_outcomes_rejected() {
        let backend = ScriptedBackend::new(vec![]);
        let err = generate(&backend, 0, 100, &NullObserver).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = ScriptedBackend::new(vec![]);
        let err = generate(&backend, 4, 0, &NullObserver).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_unchanged() {
        let backend = FailingBackend::new(BackendError::Unavailable("session expired".into()));
        let err = generate(&backend, 4, 100, &NullObserver).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Backend(BackendError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_rerun_failure_propagates() {
        // Script runs dry after the batch, so the tie-break shot fails.
        let backend = ScriptedBackend::new(vec![MeasurementCounts::from_pairs(&[
            ("00", 50),
            ("01", 50),
        ])]);

        let err = generate(&backend, 4, 100, &NullObserver).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Backend(BackendError::ExecutionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_observer_sees_tie() {
        #[derive(Default)]
        struct TieObserver {
            ties: AtomicUsize,
        }

        impl DrawObserver for TieObserver {
            fn tie_detected(&self, candidates: &[u64]) {
                assert_eq!(candidates, &[0, 2]);
                self.ties.fetch_add(1, Ordering::Relaxed);
            }
        }

        let backend = ScriptedBackend::new(vec![
            MeasurementCounts::from_pairs(&[("00", 30), ("01", 20), ("10", 30), ("11", 20)]),
            MeasurementCounts::from_pairs(&[("00", 1)]),
        ]);

        let observer = TieObserver::default();
        generate(&backend, 4, 100, &observer).await.unwrap();
        assert_eq!(observer.ties.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_draw_one_uses_single_shot() {
        let backend =
            ScriptedBackend::new(vec![MeasurementCounts::from_pairs(&[("01", 1)])]);

        let draw = draw_one(&backend, 4).await.unwrap();
        assert_eq!(draw.value, 1);
        assert_eq!(backend.calls(), vec![1]);
    }
}
