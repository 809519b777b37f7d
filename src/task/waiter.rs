//! Polling loop that waits for a task to reach a terminal state.

use crate::error::{Result, SirayError};
use crate::task::status::TaskStatus;
use async_trait::async_trait;
use std::future::Future;
use std::time::{Duration, Instant};

/// Default delay between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Default wall-clock budget for a blocking run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5 * 60 * 1000);

/// Options for a blocking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between two status queries.
    pub poll_interval: Duration,
    /// Maximum wall-clock time to wait for a terminal status.
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WaitOptions {
    /// Creates options with the default interval and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the polling interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum time to wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Something that can report the current status of a task.
///
/// Implemented for any `Fn(String) -> impl Future<Output = Result<TaskStatus>>`,
/// so a closure over the transport is enough.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the latest status of `task_id`.
    async fn fetch_status(&self, task_id: &str) -> Result<TaskStatus>;
}

#[async_trait]
impl<F, Fut> StatusSource for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TaskStatus>> + Send,
{
    async fn fetch_status(&self, task_id: &str) -> Result<TaskStatus> {
        (self)(task_id.to_owned()).await
    }
}

/// Clock and sleep capability used by the waiter.
#[async_trait]
pub trait Timer: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Timer`] backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Waits for tasks to finish by polling a [`StatusSource`].
#[derive(Debug, Clone, Default)]
pub struct TaskWaiter<T = TokioTimer> {
    options: WaitOptions,
    timer: T,
}

impl TaskWaiter<TokioTimer> {
    /// Creates a waiter using the tokio clock.
    pub fn new(options: WaitOptions) -> Self {
        Self {
            options,
            timer: TokioTimer,
        }
    }
}

impl<T: Timer> TaskWaiter<T> {
    /// Creates a waiter with a custom clock.
    pub fn with_timer(options: WaitOptions, timer: T) -> Self {
        Self { options, timer }
    }

    /// Returns the options this waiter polls with.
    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Polls `source` until `task_id` succeeds or fails.
    ///
    /// The first status query always runs before the deadline is checked.
    /// Errors from `source` are returned as-is without retrying. When the
    /// deadline passes first, returns [`SirayError::TaskTimeout`] carrying
    /// the last raw status.
    pub async fn wait<S>(&self, source: &S, task_id: &str) -> Result<TaskStatus>
    where
        S: StatusSource + ?Sized,
    {
        let start = self.timer.now();

        loop {
            let status = source.fetch_status(task_id).await?;
            let elapsed = self.timer.now().saturating_duration_since(start);

            if status.is_completed() || status.is_failed() {
                tracing::debug!(
                    task_id = %task_id,
                    status = %status.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "task reached terminal status"
                );
                return Ok(status);
            }

            if elapsed > self.options.timeout {
                tracing::debug!(
                    task_id = %task_id,
                    status = %status.status,
                    timeout_ms = self.options.timeout.as_millis() as u64,
                    "gave up waiting for task"
                );
                return Err(SirayError::TaskTimeout {
                    timeout: self.options.timeout,
                    response: Some(status.raw_response),
                });
            }

            tracing::debug!(
                task_id = %task_id,
                status = %status.status,
                progress = status.progress.as_deref().unwrap_or(""),
                elapsed_ms = elapsed.as_millis() as u64,
                "polling task status"
            );
            self.timer.sleep(self.options.poll_interval).await;
        }
    }
}

/// Polls `source` with the tokio clock until `task_id` is terminal.
pub async fn wait_for_task_completion<S>(
    source: &S,
    task_id: &str,
    options: WaitOptions,
) -> Result<TaskStatus>
where
    S: StatusSource + ?Sized,
{
    TaskWaiter::new(options).wait(source, task_id).await
}
