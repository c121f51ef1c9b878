// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP client abstraction for the IBM Quantum API.
//!
//! Provides the [`IbmHttpClient`] trait for abstracting HTTP operations and
//! [`ReqwestIbmClient`] for production use, plus [`MockIbmClient`] for
//! testing.

use async_trait::async_trait;

use crate::error::BackendError;

use super::{IbmJobRequest, IbmJobResult};

/// Trait for IBM Quantum HTTP operations.
///
/// This trait enables testing the backend without real HTTP calls.
#[async_trait]
pub trait IbmHttpClient: Send + Sync {
    /// Submit a job to IBM Quantum and return its job ID.
    async fn submit_job(&self, request: &IbmJobRequest) -> Result<String, BackendError>;

    /// Get the status and result of a previously submitted job.
    async fn get_job_result(&self, job_id: &str) -> Result<IbmJobResult, BackendError>;

    /// Check API health.
    async fn check_health(&self) -> Result<(), BackendError>;
}

/// Production HTTP client using reqwest.
///
/// Every request carries the bearer token; the instance CRN, when
/// configured, is forwarded so jobs are billed against the right plan.
#[cfg(feature = "ibm")]
pub struct ReqwestIbmClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    instance: Option<String>,
}

#[cfg(feature = "ibm")]
impl ReqwestIbmClient {
    /// Create a new IBM HTTP client.
    pub fn new(
        base_url: &str,
        token: &str,
        instance: Option<&str>,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BackendError::Http(format!("Failed to create client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            instance: instance.map(str::to_string),
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("Authorization", format!("Bearer {}", self.token));
        match &self.instance {
            Some(crn) => builder.header("Service-CRN", crn),
            None => builder,
        }
    }
}

#[cfg(feature = "ibm")]
#[async_trait]
impl IbmHttpClient for ReqwestIbmClient {
    async fn submit_job(&self, request: &IbmJobRequest) -> Result<String, BackendError> {
        let url = format!("{}/v1/jobs", self.base_url);

        let response = self
            .request(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Http(format!("IBM API request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(BackendError::AuthenticationFailed(
                "IBM API rejected the configured token".into(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::ExecutionFailed(format!(
                "IBM API returned {status}: {body}"
            )));
        }

        let job_response: super::IbmJobResponse = response
            .json()
            .await
            .map_err(|e| BackendError::ExecutionFailed(format!("Failed to parse response: {e}")))?;

        Ok(job_response.id)
    }

    async fn get_job_result(&self, job_id: &str) -> Result<IbmJobResult, BackendError> {
        let url = format!("{}/v1/jobs/{}/results", self.base_url, job_id);

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| BackendError::Http(format!("IBM API request failed: {e}")))?;

        response
            .json()
            .await
            .map_err(|e| BackendError::ExecutionFailed(format!("Failed to parse result: {e}")))
    }

    async fn check_health(&self) -> Result<(), BackendError> {
        let url = format!("{}/v1/backends", self.base_url);

        self.request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| BackendError::Http(format!("IBM health check failed: {e}")))?;

        Ok(())
    }
}

// Stub for when the ibm feature is not enabled
#[cfg(not(feature = "ibm"))]
pub struct ReqwestIbmClient;

#[cfg(not(feature = "ibm"))]
impl ReqwestIbmClient {
    pub fn new(
        _base_url: &str,
        _token: &str,
        _instance: Option<&str>,
    ) -> Result<Self, BackendError> {
        Err(BackendError::Unavailable(
            "IBM backend requires the 'ibm' feature flag".into(),
        ))
    }
}

#[cfg(not(feature = "ibm"))]
#[async_trait]
impl IbmHttpClient for ReqwestIbmClient {
    async fn submit_job(&self, _request: &IbmJobRequest) -> Result<String, BackendError> {
        Err(BackendError::Unavailable("IBM feature not enabled".into()))
    }
    async fn get_job_result(&self, _job_id: &str) -> Result<IbmJobResult, BackendError> {
        Err(BackendError::Unavailable("IBM feature not enabled".into()))
    }
    async fn check_health(&self) -> Result<(), BackendError> {
        Err(BackendError::Unavailable("IBM feature not enabled".into()))
    }
}

/// Mock IBM client for testing.
pub struct MockIbmClient {
    pub submit_response: Result<String, BackendError>,
    pub result_response: Result<IbmJobResult, BackendError>,
}

impl Default for MockIbmClient {
    fn default() -> Self {
        Self {
            submit_response: Ok("mock-job-id".to_string()),
            result_response: Ok(IbmJobResult {
                status: "DONE".to_string(),
                results: Some(vec![]),
            }),
        }
    }
}

#[async_trait]
impl IbmHttpClient for MockIbmClient {
    async fn submit_job(&self, _request: &IbmJobRequest) -> Result<String, BackendError> {
        self.submit_response.clone()
    }

    async fn get_job_result(&self, _job_id: &str) -> Result<IbmJobResult, BackendError> {
        self.result_response.clone()
    }

    async fn check_health(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
