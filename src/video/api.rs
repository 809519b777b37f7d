//! Video endpoints.

use crate::client::Siray;
use crate::error::Result;
use crate::task::api::status_path;
use crate::task::{GenerationRequest, GenerationResponse, TaskApi, TaskStatus};
use async_trait::async_trait;

const ASYNC_PATH: &str = "/v1/video/generations/async";

/// Video generation API, obtained from [`Siray::video`].
///
/// Video models only run as tasks; use [`TaskApi::submit`] for
/// fire-and-forget or [`TaskApi::run`] to wait for the result.
#[derive(Debug, Clone, Copy)]
pub struct Video<'a> {
    client: &'a Siray,
}

impl<'a> Video<'a> {
    pub(crate) fn new(client: &'a Siray) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskApi for Video<'_> {
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let raw = self.client.post(ASYNC_PATH, &request.to_body()).await?;
        Ok(GenerationResponse::from_response(raw))
    }

    async fn query_status(&self, task_id: &str) -> Result<TaskStatus> {
        let raw = self.client.get(&status_path(ASYNC_PATH, task_id)?).await?;
        Ok(TaskStatus::from_response(raw))
    }
}
