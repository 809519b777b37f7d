//! Trait shared by the media APIs that run as server-side tasks.

use crate::error::{Result, SirayError};
use crate::task::request::GenerationRequest;
use crate::task::status::{GenerationResponse, TaskStatus};
use crate::task::waiter::{wait_for_task_completion, WaitOptions};
use async_trait::async_trait;

/// An API that accepts generation requests as asynchronous tasks.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Submits a generation request and returns the created task id.
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    /// Queries the current status of a task.
    async fn query_status(&self, task_id: &str) -> Result<TaskStatus>;

    /// Submits a request and waits until the task succeeds or fails.
    ///
    /// Returns the terminal status; a failed task is returned as `Ok` with
    /// [`TaskStatus::is_failed`] set. Errors only on transport failures or
    /// when `options.timeout` elapses first.
    async fn run(&self, request: &GenerationRequest, options: WaitOptions) -> Result<TaskStatus> {
        let submitted = self.submit(request).await?;
        if submitted.task_id.is_empty() {
            return Err(SirayError::UnexpectedResponse(
                "no task_id in submission response".into(),
            ));
        }
        tracing::debug!(
            task_id = %submitted.task_id,
            model = %request.model,
            "submitted generation task"
        );

        let fetch = |task_id: String| async move { self.query_status(&task_id).await };
        wait_for_task_completion(&fetch, &submitted.task_id, options).await
    }
}

/// Builds `<base>/<task_id>` for a status endpoint.
///
/// Ids that are empty or would change the request target (`/`, `?`, `#`,
/// `%`, whitespace, control characters) are rejected.
pub(crate) fn status_path(base: &str, task_id: &str) -> Result<String> {
    if task_id.is_empty() {
        return Err(SirayError::InvalidRequest("task_id must not be empty".into()));
    }
    if let Some(bad) = task_id
        .chars()
        .find(|&c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(SirayError::InvalidRequest(format!(
            "task_id contains invalid character {bad:?}"
        )));
    }
    Ok(format!("{base}/{task_id}"))
}
