use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types for the preprocessing pipeline
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error (file operations, disk access, tree traversal)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input file could not be parsed as a supported container
    #[error("Failed to open input: {0}")]
    OpenFailed(String),

    /// No usable audio stream in the container
    #[error("No audio stream: {0}")]
    NoAudioStream(String),

    /// No decoder exists for the selected stream's codec
    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Rate-conversion state could not be constructed for the rate pair
    #[error("Failed to initialize resampler: {0}")]
    ResamplerInitFailed(String),

    /// Rate conversion failed after initialization
    #[error("Resampling error: {0}")]
    ResampleFailed(String),

    /// Output container or IO failure while encoding
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Buffer allocation failed
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    /// Output directory could not be created
    #[error("Failed to create directory {path}: {message}")]
    DirectoryCreateFailed {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying failure description
        message: String,
    },

    /// PCM buffer invariant violation
    #[error("Invalid PCM buffer: {0}")]
    InvalidPcm(String),

    /// Rejected processor configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        AudioError::WriteFailed(err.to_string())
    }
}
