//! Audio encoder implementations

pub mod wav;

pub use wav::{encode, WavEncoder};
