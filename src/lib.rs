#![warn(missing_docs)]

//! # audioprep: Batch Audio Normalization for ML Datasets
//!
//! Normalizes a tree of audio files to a uniform sample rate and duration
//! window for downstream machine-learning consumption.
//!
//! Each file runs through one pipeline: decode to interleaved 32-bit float,
//! band-limited resample to the target rate, trim or zero-pad into the
//! configured duration window, and encode as a float WAV. A batch scheduler
//! runs the pipeline concurrently over the task list with bounded
//! parallelism; a corrupt file costs only itself, never the batch.
//!
//! ## Quick Start
//!
//! ```ignore
//! use audioprep::processor::{self, ProcessorConfig};
//!
//! let config = ProcessorConfig::default(); // 16 kHz, 3.0-5.0 s window
//! let tasks = processor::collect_tasks("music/".as_ref(), "dataset/".as_ref(), config)?;
//! processor::ensure_output_dirs(&tasks)?;
//! let report = processor::run(&tasks, None);
//! println!("{} processed, {} failed", report.processed, report.failed);
//! ```

/// Core audio types
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Signal transforms (resample, duration normalize)
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Per-file pipeline and batch scheduling
pub mod processor;

pub use crate::core::PcmBuffer;
pub use crate::error::{AudioError, AudioResult};
pub use crate::processor::{process_file, BatchReport, ProcessorConfig, Task};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
