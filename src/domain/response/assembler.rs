//! Turns model output into the ordered list of messages to deliver.

use serde::{Deserialize, Serialize};

use super::detector::{ContentClass, StructuredContentDetector};
use super::item::{StructuredContent, StructuredItem};
use crate::domain::segmentation::{SegmentationConfig, SegmentationEngine};

/// How a response was broken into messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingStrategy {
    /// Blank input, delivered as a single empty message.
    Empty,
    /// Prose that fit into one message.
    Single,
    /// Prose split into several bounded messages.
    Micro,
    /// Intro, one message per item, outro.
    Structured,
}

/// Messages ready for delivery plus how they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledResponse {
    pub messages: Vec<String>,
    pub strategy: FormattingStrategy,
    pub item_count: usize,
}

impl AssembledResponse {
    /// Number of outbound messages.
    pub fn total_parts(&self) -> usize {
        self.messages.len()
    }
}

/// Builds message sequences from prose or structured content.
#[derive(Debug, Clone, Default)]
pub struct ResponseAssembler {
    engine: SegmentationEngine,
    detector: StructuredContentDetector,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom segmentation engine (e.g. a different conjunction set).
    pub fn with_engine(engine: SegmentationEngine) -> Self {
        Self {
            engine,
            detector: StructuredContentDetector::new(),
        }
    }

    /// Classifies `raw` and assembles it with the matching strategy.
    pub fn assemble(&self, raw: &str, config: &SegmentationConfig) -> AssembledResponse {
        if raw.trim().is_empty() {
            return AssembledResponse {
                messages: vec![String::new()],
                strategy: FormattingStrategy::Empty,
                item_count: 0,
            };
        }

        match self.detector.classify(raw) {
            ContentClass::Structured(content) => self.assemble_structured(&content, config),
            ContentClass::Prose => {
                let messages = self.engine.segment(raw, config);
                let strategy = if messages.len() == 1 {
                    FormattingStrategy::Single
                } else {
                    FormattingStrategy::Micro
                };
                AssembledResponse {
                    messages,
                    strategy,
                    item_count: 0,
                }
            }
        }
    }

    /// Assembles already parsed structured content.
    pub fn assemble_structured(
        &self,
        content: &StructuredContent,
        config: &SegmentationConfig,
    ) -> AssembledResponse {
        AssembledResponse {
            messages: self.assemble_parts(&content.intro, &content.items, &content.outro, config),
            strategy: FormattingStrategy::Structured,
            item_count: content.items.len(),
        }
    }

    /// Segmented intro, then exactly one rendered message per item, then
    /// segmented outro. Blank intro/outro contribute nothing.
    ///
    /// Items are never split, even when their rendering exceeds
    /// `max_chars`.
    pub fn assemble_parts(
        &self,
        intro: &str,
        items: &[StructuredItem],
        outro: &str,
        config: &SegmentationConfig,
    ) -> Vec<String> {
        let mut messages = Vec::with_capacity(items.len() + 2);

        if !intro.trim().is_empty() {
            messages.extend(self.engine.segment(intro, config));
        }
        messages.extend(items.iter().map(StructuredItem::render));
        if !outro.trim().is_empty() {
            messages.extend(self.engine.segment(outro, config));
        }

        messages
    }
}
