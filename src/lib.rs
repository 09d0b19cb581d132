//! Batch speech transcription pipeline: an HTTP transcription service and a
//! resumable batch driver that merges results into a CSV record set.

pub mod application;
pub mod domain;
pub mod driver;
pub mod infrastructure;
pub mod presentation;
