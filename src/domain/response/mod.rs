//! Response assembly.
//!
//! Classifies model output as prose or structured content and turns it
//! into the ordered messages a chat channel delivers.

mod assembler;
mod detector;
mod formatter;
mod item;

pub use assembler::{AssembledResponse, FormattingStrategy, ResponseAssembler};
pub use detector::{ContentAnalysis, ContentClass, StructuredContentDetector};
pub use formatter::{to_whatsapp_markup, ResponseFormatter, StandardFormatter, WhatsAppFormatter};
pub use item::{ItemKind, StructuredContent, StructuredItem};
