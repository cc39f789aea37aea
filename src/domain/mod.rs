//! Domain layer: deterministic text processing with no I/O.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, percentages, errors)
//! - `segmentation` - Bounded-length message segmentation
//! - `response` - Structured content detection and response assembly
//! - `capture` - Field schemas, extraction, capture state and phases
//! - `tenant` - Tenant profiles and the component registry

pub mod capture;
pub mod foundation;
pub mod response;
pub mod segmentation;
pub mod tenant;
