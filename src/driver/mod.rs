//! Client-side batch driver: feeds a directory of audio files through the
//! transcription service and persists results in a CSV record set. Safe to
//! re-run after interruption.

mod batch_driver;
mod client;

pub use batch_driver::{
    BatchDriver, DriverConfig, DriverError, RunSummary, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT,
    DEFAULT_TIMEOUT_SECS,
};
pub use client::TranscribeClient;
