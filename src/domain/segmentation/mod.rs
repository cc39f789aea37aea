//! Message segmentation.
//!
//! Turns arbitrary text into an ordered list of bounded-length message
//! units, one per outbound chat bubble.

mod config;
mod engine;

pub use config::SegmentationConfig;
pub use engine::SegmentationEngine;
