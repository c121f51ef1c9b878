// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Observability hooks for a draw.
//!
//! Progress reporting is injected rather than embedded in control flow: the
//! orchestrator calls a [`DrawObserver`] at well-defined points, and callers
//! decide what to do with each event — structured logging
//! ([`TracingObserver`]), nothing ([`NullObserver`]), or presentation such
//! as a counts histogram.

use crate::analysis::OutcomeAnalysis;
use crate::circuit::CircuitSpec;

/// Hook invoked at the well-defined points of a draw.
///
/// All methods default to no-ops, so implementations override only the
/// events they care about. `counts_analyzed` doubles as the histogram
/// presentation point: it receives every observed outcome with its count.
pub trait DrawObserver: Send + Sync {
    /// The circuit spec was derived from the requested outcome count.
    fn spec_built(&self, _spec: &CircuitSpec) {}

    /// The main batch execution completed.
    fn execution_completed(&self, _shots: u32, _distinct_patterns: usize) {}

    /// Counts were interpreted and partitioned.
    fn counts_analyzed(&self, _analysis: &OutcomeAnalysis) {}

    /// Several outcomes tied for the maximum; a single-shot re-run follows.
    fn tie_detected(&self, _candidates: &[u64]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DrawObserver for NullObserver {}

/// Observer that reports each event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DrawObserver for TracingObserver {
    fn spec_built(&self, spec: &CircuitSpec) {
        tracing::info!(
            num_qubits = spec.num_qubits,
            num_outcomes = spec.num_outcomes,
            "Circuit spec built"
        );
    }

    fn execution_completed(&self, shots: u32, distinct_patterns: usize) {
        tracing::info!(shots, distinct_patterns, "Execution completed");
    }

    fn counts_analyzed(&self, analysis: &OutcomeAnalysis) {
        tracing::debug!(
            observed = analysis.counts.len(),
            valid = analysis.valid.len(),
            normalized_spread = analysis.stats.normalized_spread,
            "Counts analyzed"
        );
    }

    fn tie_detected(&self, candidates: &[u64]) {
        tracing::info!(
            ?candidates,
            "Multiple outcomes with maximum frequency, re-running with a single shot"
        );
    }
}
