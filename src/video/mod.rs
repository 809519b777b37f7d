//! Video generation module.

mod api;

pub use api::Video;
