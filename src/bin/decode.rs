//! Resumable batch decode driver: transcribe a directory of speech clips via
//! the voxbatch API and merge the results into a CSV record set.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use voxbatch::driver::{
    BatchDriver, DriverConfig, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};
use voxbatch::infrastructure::observability::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(name = "voxbatch-decode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the audio files to transcribe
    directory: PathBuf,

    /// CSV record set with a `filename` column to receive results
    record_set: PathBuf,

    /// Files per transcription request
    #[arg(long, env = "BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Base URL of the transcription service
    #[arg(long, env = "ASR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Hard timeout per chunk request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(TracingConfig::from_env("info,voxbatch=info"));

    let cli = Cli::parse();

    let driver = BatchDriver::new(DriverConfig {
        endpoint: cli.endpoint,
        batch_size: cli.batch_size,
        timeout: Duration::from_secs(cli.timeout_secs),
    });

    let started = std::time::Instant::now();
    let summary = driver.run(&cli.directory, &cli.record_set).await?;

    println!(
        "Processed {} files: {} transcribed ({} deleted), {} remaining, in {:.2}s",
        summary.total,
        summary.succeeded,
        summary.deleted,
        summary.remaining,
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
