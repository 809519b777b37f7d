//! Fire-and-forget submission followed by a single status query.
//!
//! Run with: `cargo run --example submit_and_query -- path/to/input.png`
//!
//! Requires `SIRAY_API_KEY` environment variable.

use siray::{GenerationRequest, Siray, TaskApi};

#[tokio::main]
async fn main() -> siray::Result<()> {
    let client = Siray::new()?;

    let mut request = GenerationRequest::new(
        "black-forest-labs/flux-1.1-pro-ultra-i2i",
        "A beautiful sunset over mountains",
    );
    if let Some(path) = std::env::args().nth(1) {
        request = request.with_param("image", client.load_from_local(path).await?);
    }

    let submitted = client.image().submit(&request).await?;
    println!("Image Task ID: {}", submitted.task_id);

    let status = client.image().query_status(&submitted.task_id).await?;
    println!("Image Status: {}", status.status);
    if status.is_completed() {
        println!("Generated Image URL: {}", status.result().unwrap_or_default());
    }

    Ok(())
}
