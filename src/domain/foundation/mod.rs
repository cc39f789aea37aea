//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the assistant core.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{SessionKey, TenantId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
