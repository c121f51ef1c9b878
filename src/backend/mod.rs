// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum backend implementations.
//!
//! This module provides the [`QuantumBackend`] trait and implementations:
//!
//! - `local::LocalSamplerBackend`: local uniform sampler with optional noise
//! - `ibm::IbmBackend`: IBM Quantum via Qiskit Runtime (real HTTP client
//!   requires the `ibm` feature)

pub mod ibm;
pub mod local;
pub mod r#trait;

pub use local::LocalSamplerBackend;
pub use r#trait::{BackendType, HealthStatus, MeasurementCounts, QuantumBackend};
