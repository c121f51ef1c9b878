// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Local sampler backend.
//!
//! Samples measurement outcomes directly from the uniform distribution the
//! circuit prepares, with an optional amplitude-damping-style noise step
//! that relaxes measured `1` bits toward `0` — the same flavor of
//! perturbation a noisy device or noise-model simulator introduces. Useful
//! for development and for exercising the full selection protocol without
//! any remote execution dependency.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

use super::r#trait::{BackendType, HealthStatus, MeasurementCounts, QuantumBackend};
use crate::circuit::CircuitSpec;
use crate::config::LocalSamplerConfig;
use crate::error::BackendError;

/// Widest register the sampler can represent with `u64` outcomes.
const MAX_SAMPLER_QUBITS: u32 = 63;

/// Local uniform sampler backend.
pub struct LocalSamplerBackend {
    name: String,
    rng: Mutex<StdRng>,
    noise_enabled: bool,
    damping: f64,
    max_shots: u32,
}

impl LocalSamplerBackend {
    /// Create a sampler from configuration. A configured seed makes every
    /// draw reproducible; otherwise the generator is seeded from the OS.
    pub fn new(config: &LocalSamplerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            name: "local_sampler".to_string(),
            rng: Mutex::new(rng),
            noise_enabled: config.noise.enabled,
            damping: config.noise.damping,
            max_shots: config.max_shots,
        }
    }

    /// Create with default configuration.
    pub fn new_default() -> Self {
        Self::new(&LocalSamplerConfig::default())
    }

    fn sample(&self, spec: &CircuitSpec, shots: u32) -> HashMap<String, u32> {
        let dim = spec.dimension();
        let width = spec.num_qubits as usize;
        let mut rng = self.rng.lock();
        let mut counts: HashMap<String, u32> = HashMap::new();

        for _ in 0..shots {
            let mut outcome = rng.random_range(0..dim);
            if self.noise_enabled {
                for bit in 0..spec.num_qubits {
                    let mask = 1u64 << bit;
                    if outcome & mask != 0 && rng.random::<f64>() < self.damping {
                        outcome &= !mask;
                    }
                }
            }
            let pattern = format!("{outcome:0width$b}");
            *counts.entry(pattern).or_insert(0) += 1;
        }

        counts
    }
}

#[async_trait]
impl QuantumBackend for LocalSamplerBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    async fn execute(
        &self,
        spec: &CircuitSpec,
        shots: u32,
    ) -> Result<MeasurementCounts, BackendError> {
        if spec.num_qubits == 0 {
            return Err(BackendError::InvalidRequest(
                "a circuit with no measured qubits is ill-defined".into(),
            ));
        }
        if spec.num_qubits > MAX_SAMPLER_QUBITS {
            return Err(BackendError::InvalidRequest(format!(
                "register width {} exceeds sampler maximum {}",
                spec.num_qubits, MAX_SAMPLER_QUBITS
            )));
        }
        if shots == 0 {
            return Err(BackendError::InvalidRequest(
                "shots must be greater than 0".into(),
            ));
        }
        if shots > self.max_shots {
            return Err(BackendError::InvalidRequest(format!(
                "requested shots {} exceeds limit {}",
                shots, self.max_shots
            )));
        }

        let counts = self.sample(spec, shots);
        debug!(
            num_qubits = spec.num_qubits,
            shots,
            distinct = counts.len(),
            "Local sampling completed"
        );

        Ok(MeasurementCounts {
            bitstring_counts: counts,
            total_shots: shots,
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit;
    use crate::config::NoiseConfig;

    fn seeded(seed: u64) -> LocalSamplerBackend {
        LocalSamplerBackend::new(&LocalSamplerConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_counts_sum_to_shots() {
        let backend = seeded(42);
        let spec = circuit::build(8).unwrap();

        let result = backend.execute(&spec, 1000).await.unwrap();
        assert_eq!(result.total_shots, 1000);
        assert_eq!(result.bitstring_counts.values().sum::<u32>(), 1000);
    }

    #[tokio::test]
    async fn test_patterns_have_register_width_and_range() {
        let backend = seeded(7);
        let spec = circuit::build(5).unwrap();

        let result = backend.execute(&spec, 500).await.unwrap();
        for (bits, &count) in &result.bitstring_counts {
            assert_eq!(bits.len(), 3);
            assert!(count > 0);
            let value = u64::from_str_radix(bits, 2).unwrap();
            assert!(value < spec.dimension());
        }
    }

    #[tokio::test]
    async fn test_seed_makes_sampling_reproducible() {
        let spec = circuit::build(16).unwrap();

        let a = seeded(123).execute(&spec, 200).await.unwrap();
        let b = seeded(123).execute(&spec, 200).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_single_shot_yields_one_pattern() {
        let backend = seeded(9);
        let spec = circuit::build(4).unwrap();

        let result = backend.execute(&spec, 1).await.unwrap();
        assert_eq!(result.distinct_patterns(), 1);
        assert_eq!(result.bitstring_counts.values().sum::<u32>(), 1);
    }

    #[tokio::test]
    async fn test_full_damping_collapses_to_zero_pattern() {
        let backend = LocalSamplerBackend::new(&LocalSamplerConfig {
            seed: Some(1),
            noise: NoiseConfig {
                enabled: true,
                damping: 1.0,
            },
            ..Default::default()
        });
        let spec = circuit::build(4).unwrap();

        let result = backend.execute(&spec, 100).await.unwrap();
        assert_eq!(result.bitstring_counts.len(), 1);
        assert_eq!(result.bitstring_counts["00"], 100);
    }

    #[tokio::test]
    async fn test_zero_width_register_rejected() {
        let backend = seeded(3);
        let spec = circuit::build(1).unwrap();

        let err = backend.execute(&spec, 10).await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = seeded(3);
        let spec = circuit::build(4).unwrap();

        let err = backend.execute(&spec, 0).await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_shot_limit_enforced() {
        let backend = LocalSamplerBackend::new(&LocalSamplerConfig {
            seed: Some(3),
            max_shots: 10,
            ..Default::default()
        });
        let spec = circuit::build(4).unwrap();

        let err = backend.execute(&spec, 11).await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let backend = LocalSamplerBackend::new_default();
        assert_eq!(
            backend.health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }
}
