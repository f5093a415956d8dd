//! Signal transforms between decode and encode

pub mod duration;
pub mod resample;

pub use duration::normalize_duration;
pub use resample::resample;
