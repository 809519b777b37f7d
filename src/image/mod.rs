//! Image generation module.

mod api;
mod types;

pub use api::Image;
pub use types::{ImageData, ImageGenerationRequest, ImageGenerationResponse, ResponseFormat};
