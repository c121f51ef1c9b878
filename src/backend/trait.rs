// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum backend trait definition.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::circuit::CircuitSpec;
use crate::error::BackendError;

/// Type of backend (simulator or hardware).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Local or remote simulator
    Simulator,
    /// Real quantum hardware
    Hardware,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Simulator => write!(f, "simulator"),
            BackendType::Hardware => write!(f, "hardware"),
        }
    }
}

/// Health status of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational
    Healthy,
    /// Backend is operational but with degraded performance
    Degraded,
    /// Backend is not available
    Unavailable,
}

/// Measurement counts from one execution.
///
/// Keys are fixed-width bit patterns (most significant qubit first), values
/// are occurrence counts. Values sum to the shot count of the execution that
/// produced them; only observed patterns appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementCounts {
    /// Bit-pattern counts (e.g. `{"00": 480, "11": 520}`)
    pub bitstring_counts: HashMap<String, u32>,
    /// Shot count of the execution
    pub total_shots: u32,
}

impl MeasurementCounts {
    /// Build from `(pattern, count)` pairs; the shot total is their sum.
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Self {
        let bitstring_counts: HashMap<String, u32> = pairs
            .iter()
            .map(|&(bits, count)| (bits.to_string(), count))
            .collect();
        let total_shots = bitstring_counts.values().sum();
        Self {
            bitstring_counts,
            total_shots,
        }
    }

    /// Number of distinct patterns observed.
    pub fn distinct_patterns(&self) -> usize {
        self.bitstring_counts.len()
    }
}

/// The capability every execution backend must provide.
///
/// A backend accepts a [`CircuitSpec`] and a shot count and returns the
/// measurement counts of `shots` independent trials of the prepared state.
/// The core makes no assumption about the underlying distribution beyond
/// "approximately uniform over `2^num_qubits` patterns, possibly perturbed
/// by noise".
#[async_trait]
pub trait QuantumBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Execute the circuit for `shots` trials and return measurement counts.
    async fn execute(
        &self,
        spec: &CircuitSpec,
        shots: u32,
    ) -> Result<MeasurementCounts, BackendError>;

    /// Check backend health.
    async fn health_check(&self) -> Result<HealthStatus, BackendError>;
}
