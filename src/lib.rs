// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum random number generation over pluggable execution backends.
//!
//! A draw prepares a uniform superposition over the smallest qubit register
//! covering the requested outcome range, samples it on a backend, and
//! statistically resolves the result: the most frequent in-range outcome
//! wins, and ties for the maximum are broken by one fresh single-shot
//! execution.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │            qrng::generate                  │
//! ├─────────┬──────────┬───────────┬──────────┤
//! │ circuit │ analysis │ selection │ observer │
//! ├─────────┴──────────┴───────────┴──────────┤
//! │           QuantumBackend trait             │
//! ├──────────────────────┬────────────────────┤
//! │  LocalSamplerBackend │    IbmBackend      │
//! │  (rand)              │    (reqwest)       │
//! └──────────────────────┴────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`circuit`]: circuit spec derivation from the outcome count
//! - [`backend`]: execution backend trait and implementations
//! - [`analysis`]: counts interpretation and the spread quality metric
//! - [`selection`]: maximum-frequency selection and tie detection
//! - [`qrng`]: end-to-end draw orchestration
//! - [`observer`]: injectable progress/presentation hooks
//! - [`config`]: configuration management
//! - [`validation`]: request validation against resource limits
//! - [`error`]: error types
//!
//! # Example
//!
//! ```no_run
//! use qrng::backend::LocalSamplerBackend;
//! use qrng::observer::NullObserver;
//!
//! # async fn run() -> qrng::Result<()> {
//! let backend = LocalSamplerBackend::new_default();
//! let draw = qrng::generate(&backend, 6, 1024, &NullObserver).await?;
//! println!("rolled {} (spread {})", draw.value, draw.normalized_spread);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod backend;
pub mod circuit;
pub mod config;
pub mod error;
pub mod observer;
pub mod qrng;
pub mod selection;
pub mod validation;

pub use backend::{BackendType, HealthStatus, MeasurementCounts, QuantumBackend};
pub use circuit::CircuitSpec;
pub use config::Config;
pub use error::{Error, Result};
pub use qrng::{draw_one, generate, Draw};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
