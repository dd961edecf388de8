//! Vigil CLI - visual inspection from the command line.
//!
//! Encodes a local image, sends it to a hosted vision-language model with a
//! task-specific inspection instruction, and prints the model's verdict.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use vigil::prelude::*;
use vigil::providers::dashscope::DashScopeClient;

/// Vigil - visual inspection via hosted vision-language models
#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inspection task: area-intrusion, danger-zone-intrusion,
    /// helmet-presence or helmet-wear
    task: InspectionTask,

    /// Path of the image to inspect
    image: PathBuf,

    /// Model to use
    #[arg(short = 'M', long, env = "DASHSCOPE_MODEL", default_value = "qwen3-vl-plus")]
    model: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vigil={level},vigil_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let image = EncodedImage::load(&cli.image).await?;
    let messages = cli.task.conversation(&image);

    let model = DashScopeClient::from_env().multimodal_model(cli.model);

    println!("{}", "=".repeat(50));
    println!("🚀 Calling multimodal model...");

    let start = Instant::now();
    let response = model.generate(messages, GenerateOptions::default()).await?;
    let elapsed = start.elapsed();

    println!("✅ Model call complete");
    println!("🎯 Model: {}", model.model_id());
    println!("⏱️  Elapsed: {:.2} s", elapsed.as_secs_f64());
    println!("{}", "=".repeat(50));
    println!("{}", response.text().unwrap_or("<no text in response>"));

    Ok(())
}
