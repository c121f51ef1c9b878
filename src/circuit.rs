// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit specification for uniform-superposition sampling.
//!
//! A [`CircuitSpec`] abstractly describes the only circuit this crate ever
//! runs: a Hadamard on each of `num_qubits` qubits (a uniform superposition
//! over all `2^num_qubits` basis states), followed by measurement of every
//! qubit into a same-width classical register. How those gates are rendered
//! for a concrete backend (OpenQASM, native sampling, ...) is the backend's
//! concern.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Abstract description of a uniform-superposition sampling circuit.
///
/// Invariant: `num_qubits == ceil(log2(num_outcomes))`, with the degenerate
/// `num_outcomes == 1` case yielding a zero-width register. Immutable once
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSpec {
    /// Width of the quantum and classical registers.
    pub num_qubits: u32,
    /// Number of outcomes the caller asked for. Bit patterns `>= num_outcomes`
    /// can still be measured when this is not a power of two; they are
    /// filtered downstream.
    pub num_outcomes: u64,
}

impl CircuitSpec {
    /// Number of distinct bit patterns the register can produce.
    pub fn dimension(&self) -> u64 {
        1u64 << self.num_qubits
    }
}

/// Build the circuit spec covering `num_outcomes` outcomes.
///
/// Fails with [`Error::InvalidArgument`] when `num_outcomes` is zero.
pub fn build(num_outcomes: u64) -> Result<CircuitSpec> {
    if num_outcomes == 0 {
        return Err(Error::InvalidArgument(
            "num_outcomes must be greater than 0".into(),
        ));
    }

    let num_qubits = qubits_for(num_outcomes);
    Ok(CircuitSpec {
        num_qubits,
        num_outcomes,
    })
}

/// `ceil(log2(n))` for `n >= 1`, computed with bit arithmetic.
fn qubits_for(num_outcomes: u64) -> u32 {
    if num_outcomes <= 1 {
        return 0;
    }
    u64::BITS - (num_outcomes - 1).leading_zeros()
}
