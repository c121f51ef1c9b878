// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared deterministic backend doubles for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::backend::r#trait::{BackendType, HealthStatus, MeasurementCounts, QuantumBackend};
use crate::circuit::CircuitSpec;
use crate::error::BackendError;

/// Backend that replays a scripted sequence of results, one per `execute`
/// call, and records the shot count of every call. A call past the end of
/// the script fails with `ExecutionFailed`.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<MeasurementCounts>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<MeasurementCounts>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Shot counts of every `execute` call so far, in order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl QuantumBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    async fn execute(
        &self,
        _spec: &CircuitSpec,
        shots: u32,
    ) -> Result<MeasurementCounts, BackendError> {
        self.calls.lock().push(shots);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| BackendError::ExecutionFailed("scripted responses exhausted".into()))
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus::Healthy)
    }
}

/// Backend that fails every call with a fixed error.
pub struct FailingBackend {
    error: BackendError,
}

impl FailingBackend {
    pub fn new(error: BackendError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl QuantumBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    async fn execute(
        &self,
        _spec: &CircuitSpec,
        _shots: u32,
    ) -> Result<MeasurementCounts, BackendError> {
        Err(self.error.clone())
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Err(self.error.clone())
    }
}
