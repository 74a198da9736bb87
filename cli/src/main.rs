//! Pipescan CLI - Submit pipe X-ray images for defect detection
//!
//! ```bash
//! pipescan analyze xray1.png xray2.jpg     # Classify images, one request each
//! pipescan analyze xray1.png --json        # Machine-readable output
//! pipescan preview xray1.png -o out.txt    # Data URL the UI would display
//! ```
//!
//! The endpoint comes from `--endpoint`, `PIPESCAN_ENDPOINT` (also read
//! from `.env`), or defaults to `http://localhost:8000/predict`.

use clap::{Parser, Subcommand};
use pipescan::{
    analyze_images, preview_image, render_report, AnalyzeOptions, CliError, ClientConfig, HttpPredictClient,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipescan")]
#[command(about = "Submit pipe X-ray images for defect detection", long_about = None)]
struct Cli {
    /// Inference endpoint URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Maximum image size in bytes (no limit unless set; 0 disables)
    #[arg(long, global = true)]
    max_size: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more images
    Analyze {
        /// Image files
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Declared media type (guessed from the extension if not specified)
        #[arg(long)]
        media_type: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the preview data URL of an image
    Preview {
        /// Image file
        image: PathBuf,

        /// Declared media type (guessed from the extension if not specified)
        #[arg(long)]
        media_type: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match ClientConfig::from_env().and_then(|config| config.with_overrides(cli.endpoint, cli.max_size)) {
        Ok(config) => match cli.command {
            Commands::Analyze { images, media_type, json } => cmd_analyze(&config, &images, media_type, json).await,
            Commands::Preview { image, media_type, output } => {
                cmd_preview(&config, &image, media_type, output.as_deref()).await
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_analyze(
    config: &ClientConfig,
    images: &[PathBuf],
    media_type: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let client = HttpPredictClient::new(&config.endpoint)?;
    eprintln!("🔬 Endpoint: {}", client.endpoint());

    let options = AnalyzeOptions { media_type, max_image_bytes: config.max_image_bytes };
    let reports = analyze_images(images, &options, &client).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", render_report(report));
        }
    }

    let failed = reports.iter().filter(|report| !report.is_success()).count();
    if failed > 0 {
        return Err(CliError::Incomplete { failed, total: reports.len() });
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

async fn cmd_preview(
    config: &ClientConfig,
    image: &Path,
    media_type: Option<String>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let options = AnalyzeOptions { media_type, max_image_bytes: config.max_image_bytes };
    let data_url = preview_image(image, &options).await?;

    match output {
        Some(path) => {
            fs::write(path, &data_url).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => println!("{}", data_url),
    }

    Ok(())
}
