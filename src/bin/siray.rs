//! CLI for Siray - image and video generation.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use siray::{
    GenerationRequest, ImageGenerationRequest, ResponseFormat, Siray, TaskApi, TaskStatus,
    WaitOptions,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "siray")]
#[command(about = "Generate images and videos via the Siray API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key (defaults to SIRAY_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an image generation task
    Image(TaskArgs),

    /// Run a video generation task
    Video(TaskArgs),

    /// Query the status of a submitted task
    Status(StatusArgs),

    /// Generate images with the synchronous endpoint
    Generate(GenerateArgs),
}

#[derive(Args)]
struct TaskArgs {
    /// Model identifier
    model: String,

    /// The text prompt
    prompt: String,

    /// Extra model parameter as key=value (value parsed as JSON when possible)
    #[arg(short, long = "param", value_parser = parse_key_val)]
    params: Vec<(String, String)>,

    /// Local image passed as a data URI, as key=path
    #[arg(short, long = "file", value_parser = parse_key_val)]
    files: Vec<(String, String)>,

    /// Submit only and print the task id
    #[arg(long = "async")]
    no_wait: bool,

    /// Delay between status queries in milliseconds
    #[arg(long, default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Maximum wait in milliseconds
    #[arg(long, default_value_t = 300_000)]
    timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediaArg {
    Image,
    Video,
}

#[derive(Args)]
struct StatusArgs {
    /// Which API the task was submitted to
    #[arg(value_enum)]
    media: MediaArg,

    /// Task identifier
    task_id: String,
}

#[derive(Args)]
struct GenerateArgs {
    /// Model identifier
    model: String,

    /// The text prompt
    prompt: String,

    /// Number of images
    #[arg(short)]
    n: Option<u32>,

    /// Image size, e.g. 1024x1024
    #[arg(long)]
    size: Option<String>,

    /// Return base64 payloads instead of URLs
    #[arg(long)]
    b64: bool,

    /// Extra model parameter as key=value
    #[arg(short, long = "param", value_parser = parse_key_val)]
    params: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn param_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Siray::builder();
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;

    match cli.command {
        Commands::Image(args) => run_task(&client.image(), &client, args, cli.json).await?,
        Commands::Video(args) => run_task(&client.video(), &client, args, cli.json).await?,
        Commands::Status(args) => {
            let status = match args.media {
                MediaArg::Image => client.image().query_status(&args.task_id).await?,
                MediaArg::Video => client.video().query_status(&args.task_id).await?,
            };
            print_status(&status, cli.json)?;
        }
        Commands::Generate(args) => generate(&client, args, cli.json).await?,
    }

    Ok(())
}

async fn build_request(client: &Siray, args: &TaskArgs) -> anyhow::Result<GenerationRequest> {
    let mut request = GenerationRequest::new(&args.model, &args.prompt);
    for (key, value) in &args.params {
        request = request.with_param(key, param_value(value));
    }
    for (key, path) in &args.files {
        let uri = client
            .load_from_local(PathBuf::from(path))
            .await
            .with_context(|| format!("failed to load {path}"))?;
        request = request.with_param(key, uri);
    }
    Ok(request)
}

async fn run_task<A: TaskApi>(
    api: &A,
    client: &Siray,
    args: TaskArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let request = build_request(client, &args).await?;

    if args.no_wait {
        let submitted = api.submit(&request).await?;
        if json_output {
            println!("{}", serde_json::to_string_pretty(&submitted.raw_response)?);
        } else {
            println!("Submitted task: {}", submitted.task_id);
        }
        return Ok(());
    }

    let options = WaitOptions::new()
        .poll_interval(Duration::from_millis(args.poll_interval_ms))
        .timeout(Duration::from_millis(args.timeout_ms));
    eprintln!("[siray] Waiting for {} ...", args.model);
    let status = api.run(&request, options).await?;
    print_status(&status, json_output)?;

    if status.is_failed() {
        anyhow::bail!(
            "task {} failed: {}",
            status.task_id,
            status.fail_reason.as_deref().unwrap_or("no reason given")
        );
    }
    Ok(())
}

fn print_status(status: &TaskStatus, json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&status.raw_response)?);
        return Ok(());
    }

    println!("Task: {}", status.task_id);
    println!("Status: {}", status.status);
    if let Some(percent) = status.progress_percent() {
        println!("Progress: {percent}%");
    }
    if let Some(reason) = &status.fail_reason {
        println!("Failure: {reason}");
    }
    for output in &status.outputs {
        println!("Output: {output}");
    }
    Ok(())
}

async fn generate(client: &Siray, args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let mut request = ImageGenerationRequest::new(&args.model, &args.prompt);
    if let Some(n) = args.n {
        request = request.with_n(n);
    }
    if let Some(size) = args.size {
        request = request.with_size(size);
    }
    if args.b64 {
        request = request.with_response_format(ResponseFormat::B64Json);
    }
    for (key, value) in &args.params {
        request = request.with_param(key, param_value(value));
    }

    let response = client.image().generate(&request).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Generated {} image(s)", response.data.len());
        for image in &response.data {
            match (&image.url, &image.b64_json) {
                (Some(url), _) => println!("  {url}"),
                (None, Some(b64)) => println!("  <base64, {} bytes>", b64.len()),
                (None, None) => println!("  <empty>"),
            }
        }
    }
    Ok(())
}
