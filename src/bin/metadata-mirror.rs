//! CLI binary for the metadata-mirror crate.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use metadata_mirror::{
    CloudProvider, MetadataMirror, MirrorError, DEFAULT_BASE_URL, DEFAULT_MAX_DEPTH,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metadata-mirror")]
#[command(
    author,
    version,
    about = "Recursively downloads all available instance metadata to the given path"
)]
#[command(group(ArgGroup::new("provider").required(true).args(["amazon", "google"])))]
struct Cli {
    /// Download Amazon instance metadata
    #[arg(long)]
    amazon: bool,

    /// Download Google instance metadata
    #[arg(long)]
    google: bool,

    /// Directory to write the metadata tree into
    output: PathBuf,

    /// Metadata service base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Maximum path depth to descend into
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum size in bytes of a single response (fails if exceeded)
    #[arg(short, long)]
    max_size: Option<usize>,
}

impl Cli {
    fn provider(&self) -> CloudProvider {
        if self.google {
            CloudProvider::Gcp
        } else {
            CloudProvider::Aws
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), MirrorError> {
    let mirror = MetadataMirror::for_provider(
        cli.provider(),
        &cli.base_url,
        Duration::from_secs(cli.timeout),
    )?
    .with_max_depth(cli.max_depth);

    let mirror = match cli.max_size {
        Some(size) => mirror.with_max_size(size),
        None => mirror,
    };

    mirror.mirror(&cli.output).await?;
    Ok(())
}
