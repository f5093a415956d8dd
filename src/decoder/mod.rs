//! Audio decoder implementations

pub mod symphonia;

pub use self::symphonia::SymphoniaDecoder;
