//! Pluggable response formatters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::assembler::{AssembledResponse, FormattingStrategy, ResponseAssembler};
use crate::domain::segmentation::SegmentationConfig;

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"));
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("header regex is valid"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").expect("bullet regex is valid"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("inline code regex is valid"));

/// Turns raw model output into deliverable messages.
pub trait ResponseFormatter: Send + Sync {
    /// Registry name of this formatter.
    fn name(&self) -> &str;

    /// Formats `raw` under the given bounds.
    fn format(&self, raw: &str, config: &SegmentationConfig) -> AssembledResponse;
}

/// Markdown-preserving formatter: segmentation and structure only.
#[derive(Debug, Clone, Default)]
pub struct StandardFormatter {
    assembler: ResponseAssembler,
}

impl StandardFormatter {
    pub const NAME: &'static str = "standard";

    pub fn new(assembler: ResponseAssembler) -> Self {
        Self { assembler }
    }
}

impl ResponseFormatter for StandardFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn format(&self, raw: &str, config: &SegmentationConfig) -> AssembledResponse {
        self.assembler.assemble(raw, config)
    }
}

/// Rewrites Markdown into WhatsApp markup after assembly.
///
/// Conversion runs per message, so item messages stay atomic. Rewrites
/// never add characters, so `max_chars` still holds, but a message can
/// drop below `min_chars` or end up blank. Blank messages are dropped.
#[derive(Debug, Clone, Default)]
pub struct WhatsAppFormatter {
    assembler: ResponseAssembler,
}

impl WhatsAppFormatter {
    pub const NAME: &'static str = "whatsapp";

    pub fn new(assembler: ResponseAssembler) -> Self {
        Self { assembler }
    }
}

impl ResponseFormatter for WhatsAppFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn format(&self, raw: &str, config: &SegmentationConfig) -> AssembledResponse {
        let mut response = self.assembler.assemble(raw, config);
        response.messages = response
            .messages
            .iter()
            .map(|message| to_whatsapp_markup(message).trim().to_string())
            .filter(|message| !message.is_empty())
            .collect();
        if response.messages.is_empty() {
            response.messages.push(String::new());
            response.strategy = FormattingStrategy::Empty;
        }
        response
    }
}

/// `**bold**` → `*bold*`, drops `#` headers and inline-code backticks,
/// and normalises `-`/`*`/`+` bullets to `•`.
pub fn to_whatsapp_markup(text: &str) -> String {
    let text = BOLD.replace_all(text, "*$1*");
    let text = HEADER.replace_all(&text, "");
    let text = BULLET.replace_all(&text, "• ");
    let text = INLINE_CODE.replace_all(&text, "$1");
    text.into_owned()
}
