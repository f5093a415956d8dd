//! Core audio types

/// PCM sample buffer
pub mod audio;

pub use audio::PcmBuffer;
