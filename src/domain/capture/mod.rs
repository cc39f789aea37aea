//! Target-field capture.
//!
//! Per-tenant field schemas, keyword-triggered extraction from user
//! utterances, the per-session capture state and the derived
//! conversation phase.

mod extractor;
mod field;
mod phase;
mod schema;
mod state;
mod templates;

pub use extractor::TargetExtractor;
pub use field::{FieldDefinition, FieldType};
pub use phase::{ConversationPhase, PhaseClassifier, PhasePolicy};
pub use schema::{FieldSchema, FieldSchemaDocument, SchemaError};
pub use state::{CaptureState, CaptureUpdate};
pub use templates::SchemaTemplate;
