//! Submission notification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::layer::ResourceType;
use crate::source::{AsyncHttpClient, PlanContext, SourceError};

/// Message the submission endpoint answers with on success.
const SUCCESS_MESSAGE: &str = "Success";

/// Submission errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission request failed: {0}")]
    Http(#[from] SourceError),

    #[error("failed to encode submission: {0}")]
    Encode(String),

    #[error("invalid submission response: {0}")]
    InvalidResponse(String),
}

/// JSON body posted after a form was filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub layer_name: String,
    pub resource_type: String,
    pub plan_id: String,
    pub plan_name: String,
    pub district_name: String,
    pub block_name: String,
}

impl SubmissionPayload {
    pub fn new(resource_type: ResourceType, plan: &PlanContext) -> Self {
        Self {
            layer_name: format!("{}_{}", resource_type.as_str(), plan.plan_suffix()),
            resource_type: resource_type.as_str().to_string(),
            plan_id: plan.plan_id.clone(),
            plan_name: plan.plan_name.clone(),
            district_name: plan.district.clone(),
            block_name: plan.block.clone(),
        }
    }
}

/// `{message}` answer of the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionResponse {
    pub message: String,
}

impl SubmissionResponse {
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }
}

/// Posts submission payloads.
pub struct SubmissionClient<C> {
    client: Arc<C>,
    url: String,
}

impl<C: AsyncHttpClient> SubmissionClient<C> {
    pub fn new(client: Arc<C>, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionResponse, SubmissionError> {
        let body =
            serde_json::to_string(payload).map_err(|e| SubmissionError::Encode(e.to_string()))?;
        debug!(url = %self.url, layer = %payload.layer_name, "Posting submission");

        let raw = self.client.post_json(&self.url, &body).await?;
        let response: SubmissionResponse = serde_json::from_slice(&raw)
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;

        info!(
            layer = %payload.layer_name,
            message = %response.message,
            "Submission acknowledged"
        );
        Ok(response)
    }
}
