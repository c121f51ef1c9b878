// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for draw requests.

use crate::circuit;
use crate::config::ResourceLimits;
use crate::error::{Error, Result};

/// Validate draw request parameters against resource limits.
pub fn validate_draw_request(
    num_outcomes: u64,
    shots: u32,
    limits: &ResourceLimits,
) -> Result<()> {
    if shots == 0 {
        return Err(Error::InvalidArgument("shots must be greater than 0".into()));
    }

    if shots > limits.max_shots {
        return Err(Error::InvalidArgument(format!(
            "requested shots {} exceeds limit {}",
            shots, limits.max_shots
        )));
    }

    let spec = circuit::build(num_outcomes)?;
    if spec.num_qubits > limits.max_qubits {
        return Err(Error::InvalidArgument(format!(
            "{} outcomes need {} qubits, exceeding limit {}",
            num_outcomes, spec.num_qubits, limits.max_qubits
        )));
    }

    Ok(())
}
