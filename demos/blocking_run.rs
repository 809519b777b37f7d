//! Blocking image and video runs.
//!
//! Run with: `cargo run --example blocking_run`
//!
//! Requires `SIRAY_API_KEY` environment variable.

use siray::{GenerationRequest, Siray, TaskApi, TaskStatus, WaitOptions};
use std::time::Duration;

fn report(kind: &str, status: &TaskStatus) {
    if status.is_completed() {
        println!("{kind} ready at: {}", status.result().unwrap_or("<no output>"));
    } else if status.is_failed() {
        println!(
            "{kind} generation failed: {}",
            status.fail_reason.as_deref().unwrap_or("unknown reason")
        );
    } else {
        println!("{kind} generation finished with status: {}", status.status);
    }
}

#[tokio::main]
async fn main() -> siray::Result<()> {
    let client = Siray::new()?;

    println!("Submitting blocking image generation request...");
    let image = client
        .image()
        .run(
            &GenerationRequest::new(
                "black-forest-labs/flux-1.1-pro-ultra-t2i",
                "A cinematic portrait photo of a cyberpunk samurai",
            ),
            WaitOptions::new()
                .poll_interval(Duration::from_secs(3))
                .timeout(Duration::from_secs(3 * 60)),
        )
        .await?;
    report("Image", &image);

    println!("Submitting blocking video generation request...");
    let video = client
        .video()
        .run(
            &GenerationRequest::new(
                "your-video-model",
                "A futuristic drone flying through neon-lit city streets",
            ),
            WaitOptions::new()
                .poll_interval(Duration::from_secs(5))
                .timeout(Duration::from_secs(10 * 60)),
        )
        .await?;
    report("Video", &video);

    Ok(())
}
