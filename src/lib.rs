#![warn(missing_docs)]
//! Siray - async client for the Siray image and video generation API.
//!
//! Generation requests run as server-side tasks. Submit one and keep the
//! task id, or let [`TaskApi::run`] poll until it finishes.
//!
//! # Quick Start - Blocking run
//!
//! ```no_run
//! use siray::{GenerationRequest, Siray, TaskApi, WaitOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> siray::Result<()> {
//!     let client = Siray::new()?;
//!     let request = GenerationRequest::new(
//!         "black-forest-labs/flux-1.1-pro-ultra-t2i",
//!         "A cinematic portrait photo of a cyberpunk samurai",
//!     );
//!     let options = WaitOptions::new()
//!         .poll_interval(Duration::from_secs(3))
//!         .timeout(Duration::from_secs(180));
//!
//!     let status = client.image().run(&request, options).await?;
//!     if let Some(url) = status.result() {
//!         println!("image ready at {url}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Fire and forget
//!
//! ```no_run
//! use siray::{GenerationRequest, Siray, TaskApi};
//!
//! #[tokio::main]
//! async fn main() -> siray::Result<()> {
//!     let client = Siray::builder().api_key("sk-...").build()?;
//!     let request = GenerationRequest::new("your-video-model", "A drone over neon streets");
//!     let submitted = client.video().submit(&request).await?;
//!
//!     let status = client.video().query_status(&submitted.task_id).await?;
//!     println!("{}: {}", submitted.task_id, status.status);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli`: the `siray` command-line interface

mod client;
mod error;
pub mod image;
mod local_file;
pub mod task;
pub mod video;

pub use client::{Siray, SirayBuilder, API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::{Result, SirayError, TASK_TIMEOUT_CODE};
pub use image::{Image, ImageData, ImageGenerationRequest, ImageGenerationResponse, ResponseFormat};
pub use local_file::{load_from_local, mime_type_for_extension};
pub use task::{
    wait_for_task_completion, GenerationRequest, GenerationResponse, StatusSource, TaskApi,
    TaskState, TaskStatus, TaskWaiter, Timer, TokioTimer, WaitOptions,
};
pub use video::Video;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::Siray;
    pub use crate::error::{Result, SirayError};
    pub use crate::task::{GenerationRequest, TaskApi, TaskState, TaskStatus, WaitOptions};
}
