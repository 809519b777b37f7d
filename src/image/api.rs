//! Image endpoints.

use crate::client::Siray;
use crate::error::Result;
use crate::image::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::task::api::status_path;
use crate::task::{GenerationRequest, GenerationResponse, TaskApi, TaskStatus};
use async_trait::async_trait;

const GENERATIONS_PATH: &str = "/v1/images/generations";
const ASYNC_PATH: &str = "/v1/images/generations/async";

/// Image generation API, obtained from [`Siray::image`].
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    client: &'a Siray,
}

impl<'a> Image<'a> {
    pub(crate) fn new(client: &'a Siray) -> Self {
        Self { client }
    }

    /// Generates images synchronously and returns them in the reply.
    pub async fn generate(&self, request: &ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let raw = self.client.post(GENERATIONS_PATH, &request.to_body()).await?;
        Ok(serde_json::from_value(raw)?)
    }
}

#[async_trait]
impl TaskApi for Image<'_> {
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let raw = self.client.post(ASYNC_PATH, &request.to_body()).await?;
        Ok(GenerationResponse::from_response(raw))
    }

    async fn query_status(&self, task_id: &str) -> Result<TaskStatus> {
        let raw = self.client.get(&status_path(ASYNC_PATH, task_id)?).await?;
        Ok(TaskStatus::from_response(raw))
    }
}
