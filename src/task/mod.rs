//! Asynchronous task tracking: status model, requests and the completion waiter.

pub(crate) mod api;
mod request;
mod status;
mod waiter;

pub use api::TaskApi;
pub use request::GenerationRequest;
pub use status::{GenerationResponse, TaskState, TaskStatus};
pub use waiter::{
    wait_for_task_completion, StatusSource, TaskWaiter, Timer, TokioTimer, WaitOptions,
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
