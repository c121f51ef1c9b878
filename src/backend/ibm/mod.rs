// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! IBM Quantum backend via the Qiskit Runtime REST API.
//!
//! Renders the uniform-superposition spec to OpenQASM 3.0 (`h` on every
//! qubit, then full measurement) and submits it as a `sampler` job. The
//! backend is generic over [`IbmHttpClient`], enabling deterministic
//! testing with a mock client while using [`ReqwestIbmClient`] in
//! production (behind the `ibm` cargo feature).

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::r#trait::{BackendType, HealthStatus, MeasurementCounts, QuantumBackend};
use crate::circuit::CircuitSpec;
use crate::config::IbmConfig;
use crate::error::BackendError;

use client::{IbmHttpClient, ReqwestIbmClient};

/// IBM systems this backend knows how to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbmSystem {
    /// IBM Eagle r3 (127 qubits)
    EagleR3,
    /// IBM Heron (156 qubits)
    Heron,
    /// IBM Qiskit Aer simulator
    AerSimulator,
}

impl IbmSystem {
    /// Number of qubits for this system.
    pub fn num_qubits(&self) -> u32 {
        match self {
            IbmSystem::EagleR3 => 127,
            IbmSystem::Heron => 156,
            IbmSystem::AerSimulator => 100,
        }
    }

    /// IBM backend name string.
    pub fn backend_name(&self) -> &str {
        match self {
            IbmSystem::EagleR3 => "ibm_brisbane",
            IbmSystem::Heron => "ibm_torino",
            IbmSystem::AerSimulator => "aer_simulator",
        }
    }

    /// Parse the configured system name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ibm_brisbane" => Some(IbmSystem::EagleR3),
            "ibm_torino" => Some(IbmSystem::Heron),
            "aer_simulator" => Some(IbmSystem::AerSimulator),
            _ => None,
        }
    }
}

/// IBM job request (Qiskit Runtime primitive format).
#[derive(Debug, Serialize)]
pub struct IbmJobRequest {
    /// Program ID (always "sampler" for this backend).
    pub program_id: String,
    /// Backend name.
    pub backend: String,
    /// Input parameters.
    pub params: IbmJobParams,
}

/// IBM job input parameters.
#[derive(Debug, Serialize)]
pub struct IbmJobParams {
    /// OpenQASM 3.0 circuits.
    pub circuits: Vec<String>,
    /// Number of shots.
    pub shots: u32,
    /// Optimization level (0–3).
    pub optimization_level: u32,
}

/// IBM job response.
#[derive(Debug, Deserialize)]
pub struct IbmJobResponse {
    /// Job ID.
    pub id: String,
    /// Job status.
    pub status: String,
}

/// IBM job result.
#[derive(Debug, Clone, Deserialize)]
pub struct IbmJobResult {
    /// Job status.
    pub status: String,
    /// Result data.
    pub results: Option<Vec<IbmCircuitResult>>,
}

/// Result of a single circuit execution.
#[derive(Debug, Clone, Deserialize)]
pub struct IbmCircuitResult {
    /// Measurement counts.
    pub counts: HashMap<String, u32>,
    /// Total shots.
    pub shots: u32,
}

/// IBM Quantum backend.
pub struct IbmBackend<C: IbmHttpClient = ReqwestIbmClient> {
    name: String,
    system: IbmSystem,
    client: C,
    job_timeout: Duration,
}

impl IbmBackend<ReqwestIbmClient> {
    /// Create from configuration.
    pub fn from_config(config: &IbmConfig) -> Result<Self, BackendError> {
        if !config.enabled {
            return Err(BackendError::Unavailable("IBM backend is disabled".into()));
        }

        let system = IbmSystem::from_name(&config.system).ok_or_else(|| {
            BackendError::InvalidRequest(format!("Unknown IBM system: {}", config.system))
        })?;

        let api_url = config
            .api_url
            .as_deref()
            .unwrap_or("https://api.quantum-computing.ibm.com");
        let token = config.auth_token.as_deref().ok_or_else(|| {
            BackendError::AuthenticationFailed("IBM API token not configured".into())
        })?;

        let client = ReqwestIbmClient::new(api_url, token, config.instance.as_deref())?;

        Ok(Self {
            name: format!("ibm_{}", system.backend_name()),
            system,
            client,
            job_timeout: Duration::from_secs(config.job_timeout_secs),
        })
    }
}

impl<C: IbmHttpClient> IbmBackend<C> {
    /// Create with a custom HTTP client (for testing).
    pub fn with_client(system: IbmSystem, client: C, job_timeout: Duration) -> Self {
        Self {
            name: format!("ibm_{}", system.backend_name()),
            system,
            client,
            job_timeout,
        }
    }

    /// Render the spec to OpenQASM 3.0: a Hadamard on every qubit, then a
    /// full measurement into a same-width classical register.
    fn spec_to_qasm(&self, spec: &CircuitSpec) -> String {
        let n = spec.num_qubits as usize;

        let mut qasm = String::from("OPENQASM 3.0;\n");
        qasm.push_str("include \"stdgates.inc\";\n");
        qasm.push_str(&format!("qubit[{n}] q;\n"));
        qasm.push_str(&format!("bit[{n}] c;\n\n"));

        for i in 0..n {
            qasm.push_str(&format!("h q[{i}];\n"));
        }

        qasm.push('\n');
        for i in 0..n {
            qasm.push_str(&format!("c[{i}] = measure q[{i}];\n"));
        }

        qasm
    }

    /// Submit a job and poll until it finishes or the deadline passes.
    async fn submit_and_wait(&self, qasm: &str, shots: u32) -> Result<IbmJobResult, BackendError> {
        let job_request = IbmJobRequest {
            program_id: "sampler".to_string(),
            backend: self.system.backend_name().to_string(),
            params: IbmJobParams {
                circuits: vec![qasm.to_string()],
                shots,
                optimization_level: 2,
            },
        };

        let job_id = self.client.submit_job(&job_request).await?;
        info!(job_id = %job_id, backend = %self.system.backend_name(), "IBM job submitted");

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_secs(2);

        loop {
            if start.elapsed() > self.job_timeout {
                return Err(BackendError::Timeout(format!(
                    "IBM job {job_id} did not finish within {}s",
                    self.job_timeout.as_secs()
                )));
            }

            let result = self.client.get_job_result(&job_id).await?;

            match result.status.as_str() {
                "DONE" | "Completed" => return Ok(result),
                "FAILED" | "CANCELLED" | "ERROR" => {
                    return Err(BackendError::ExecutionFailed(format!(
                        "IBM job {job_id} failed with status: {}",
                        result.status
                    )));
                }
                _ => {
                    debug!(job_id = %job_id, status = %result.status, "IBM job still running");
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl<C: IbmHttpClient> QuantumBackend for IbmBackend<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        if self.system == IbmSystem::AerSimulator {
            BackendType::Simulator
        } else {
            BackendType::Hardware
        }
    }

    async fn execute(
        &self,
        spec: &CircuitSpec,
        shots: u32,
    ) -> Result<MeasurementCounts, BackendError> {
        debug!(
            num_qubits = spec.num_qubits,
            shots,
            system = ?self.system,
            "Executing sampling circuit on IBM backend"
        );

        if spec.num_qubits == 0 {
            return Err(BackendError::InvalidRequest(
                "a circuit with no measured qubits is ill-defined".into(),
            ));
        }
        if spec.num_qubits > self.system.num_qubits() {
            return Err(BackendError::InvalidRequest(format!(
                "register width {} exceeds {}'s {} qubits",
                spec.num_qubits,
                self.system.backend_name(),
                self.system.num_qubits()
            )));
        }
        if shots == 0 {
            return Err(BackendError::InvalidRequest(
                "shots must be greater than 0".into(),
            ));
        }

        let qasm = self.spec_to_qasm(spec);
        let result = self.submit_and_wait(&qasm, shots).await?;

        let circuit_result = result
            .results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| {
                BackendError::ExecutionFailed("No circuit results in IBM response".into())
            })?;

        Ok(MeasurementCounts {
            bitstring_counts: circuit_result.counts,
            total_shots: circuit_result.shots,
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        match self.client.check_health().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "IBM health check failed");
                Ok(HealthStatus::Unavailable)
            }
        }
    }
}
