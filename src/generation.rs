//! Contract generation service boundary.
//!
//! An external service can draft a whole contract from a short description.
//! The engine only sees a complete response or a failure; a failure is
//! logged and reported as [`DraftError::GenerationFailed`] with no retry.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::error::DraftError;

/// Request body sent to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub contract_type: String,
    pub details: String,
    pub party1: String,
    pub party2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_clauses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_requirements: Option<String>,
}

/// Generated contract text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
}

/// A service that drafts contracts from a request
#[async_trait]
pub trait ContractGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}

/// Await one generated contract; any failure becomes [`DraftError::GenerationFailed`]
pub async fn generate_contract(
    generator: &dyn ContractGenerator,
    request: &GenerationRequest,
) -> Result<String, DraftError> {
    debug!(contract_type = %request.contract_type, "requesting generated contract");
    match generator.generate(request).await {
        Ok(response) => Ok(response.content),
        Err(e) => {
            error!("Contract generation failed: {:#}", e);
            Err(DraftError::GenerationFailed)
        }
    }
}

/// Posts [`GenerationRequest`]s as JSON to an HTTP endpoint
#[derive(Clone)]
pub struct HttpContractGenerator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContractGenerator {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContractGenerator for HttpContractGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Generation service error {}: {}", status, body));
        }

        let generated: GenerationResponse = response.json().await?;
        if generated.content.trim().is_empty() {
            return Err(anyhow!("Empty response from generation service"));
        }
        Ok(generated)
    }
}
