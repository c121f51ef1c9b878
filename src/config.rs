// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. qrng.yaml file (or an explicit `--config` path)
//! 3. Environment variables (QRNG_*, IBM_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend configurations
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Sampling defaults
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        // Load from file if specified
        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            // Try default locations
            for path in &["qrng.yaml", "qrng.yml", "/etc/qrng/config.yaml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QRNG_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("QRNG_SHOTS") {
            if let Ok(shots) = val.parse() {
                self.sampling.shots = shots;
            }
        }
        if let Ok(val) = env::var("QRNG_LOCAL_SEED") {
            if let Ok(seed) = val.parse() {
                self.backends.local_sampler.seed = Some(seed);
            }
        }
        if let Ok(val) = env::var("QRNG_NOISE_ENABLED") {
            self.backends.local_sampler.noise.enabled =
                val.to_lowercase() == "true" || val == "1";
        }

        // IBM backend
        if let Ok(val) = env::var("IBM_API_URL") {
            self.backends.ibm.api_url = Some(val);
        }
        if let Ok(val) = env::var("IBM_API_TOKEN") {
            self.backends.ibm.auth_token = Some(val);
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.shots == 0 {
            return Err(Error::Config("sampling.shots cannot be 0".into()));
        }
        if self.limits.max_shots == 0 {
            return Err(Error::Config("limits.max_shots cannot be 0".into()));
        }
        if self.limits.max_qubits == 0 {
            return Err(Error::Config("limits.max_qubits cannot be 0".into()));
        }
        let damping = self.backends.local_sampler.noise.damping;
        if !(0.0..=1.0).contains(&damping) {
            return Err(Error::Config(format!(
                "noise.damping must lie in [0, 1], got {}",
                damping
            )));
        }
        if self.backends.ibm.enabled && self.backends.ibm.auth_token.is_none() {
            tracing::warn!(
                "IBM backend is enabled but no API token is configured. \
                 Set IBM_API_TOKEN or backends.ibm.auth_token."
            );
        }
        Ok(())
    }

    /// Name of the backend draws go to when none is requested explicitly.
    pub fn default_backend(&self) -> &str {
        if self.backends.local_sampler.enabled && self.backends.local_sampler.default {
            "local_sampler"
        } else if self.backends.ibm.enabled {
            "ibm"
        } else {
            "local_sampler"
        }
    }
}

/// Backend configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Local sampler backend
    #[serde(default)]
    pub local_sampler: LocalSamplerConfig,

    /// IBM Quantum backend
    #[serde(default)]
    pub ibm: IbmConfig,
}

/// Local sampler backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSamplerConfig {
    /// Whether the backend is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether this is the default backend
    #[serde(default = "default_true")]
    pub default: bool,

    /// Seed for reproducible sampling (None = seed from the OS)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulated noise
    #[serde(default)]
    pub noise: NoiseConfig,

    /// Maximum shots per request
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,
}

impl Default for LocalSamplerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default: true,
            seed: None,
            noise: NoiseConfig::default(),
            max_shots: default_max_shots(),
        }
    }
}

/// Simulated noise configuration for the local sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Whether noise is applied
    #[serde(default)]
    pub enabled: bool,

    /// Per-bit probability that a measured 1 relaxes to 0
    #[serde(default = "default_damping")]
    pub damping: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            damping: default_damping(),
        }
    }
}

fn default_damping() -> f64 {
    0.02
}

/// IBM Quantum backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbmConfig {
    /// Whether the backend is enabled
    #[serde(default)]
    pub enabled: bool,

    /// IBM Quantum API URL
    #[serde(default)]
    pub api_url: Option<String>,

    /// API token
    #[serde(default)]
    pub auth_token: Option<String>,

    /// IBM instance (e.g. "ibm-q/open/main")
    #[serde(default)]
    pub instance: Option<String>,

    /// Target system name (e.g. "aer_simulator", "ibm_brisbane")
    #[serde(default = "default_ibm_system")]
    pub system: String,

    /// Job timeout in seconds
    #[serde(default = "default_job_timeout")]
    pub job_timeout_secs: u64,
}

impl Default for IbmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: None,
            auth_token: None,
            instance: None,
            system: default_ibm_system(),
            job_timeout_secs: default_job_timeout(),
        }
    }
}

fn default_ibm_system() -> String {
    "aer_simulator".into()
}

fn default_job_timeout() -> u64 {
    300
}

/// Sampling defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Shots per draw when the caller does not specify
    #[serde(default = "default_shots")]
    pub shots: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
        }
    }
}

fn default_shots() -> u32 {
    1
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum register width a draw may require
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Maximum shots per draw
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            max_shots: default_max_shots(),
        }
    }
}

fn default_max_qubits() -> u32 {
    24
}

fn default_max_shots() -> u32 {
    100_000
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

fn default_true() -> bool {
    true
}
