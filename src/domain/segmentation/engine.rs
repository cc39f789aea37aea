//! Tiered text segmentation.
//!
//! Splits arbitrary text into chat-bubble sized units. Each tier is tried
//! only when the previous one cannot bring a piece under `max_chars`:
//!
//! 1. Sentence packing (`.`, `!`, `?` followed by whitespace)
//! 2. Natural pauses (`,`, `:`, `;` followed by whitespace)
//! 3. Coordinating conjunctions ("e", "mas", "porém", ...)
//! 4. Word packing
//! 5. An irreducible token longer than `max_chars` is emitted whole
//!
//! Lengths are measured in characters, not bytes. Splits only ever happen at
//! whitespace, so joining the units with single spaces yields the original
//! word sequence.

use super::config::SegmentationConfig;

/// Conjunctions used by tier 3, Portuguese first with English equivalents.
const DEFAULT_CONJUNCTIONS: &[&str] = &[
    "e", "mas", "porém", "porem", "entretanto", "todavia", "contudo", "então", "entao", "que",
    "pois", "ou", "and", "but", "so", "or",
];

/// Splits text into bounded message units.
///
/// Pure and deterministic: the output depends only on the input text, the
/// configuration and the conjunction list.
#[derive(Debug, Clone)]
pub struct SegmentationEngine {
    conjunctions: Vec<String>,
}

impl SegmentationEngine {
    /// Creates an engine with the default conjunction list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tier-3 conjunction list (matched case-insensitively).
    pub fn with_conjunctions<I, S>(mut self, conjunctions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conjunctions = conjunctions
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    /// Splits `text` into ordered message units.
    ///
    /// - Blank input yields `[""]`.
    /// - Input already within `max_chars` is returned untouched.
    /// - Otherwise no unit is empty, and every unit fits in `max_chars`
    ///   unless it is a single whitespace-free token that is longer.
    pub fn segment(&self, text: &str, config: &SegmentationConfig) -> Vec<String> {
        if text.trim().is_empty() {
            return vec![String::new()];
        }
        if char_len(text) <= config.max_chars() {
            return vec![text.to_string()];
        }

        let text = text.trim();
        let sentences = split_sentences(text);
        if sentences.len() > 1 {
            self.pack_sentences(&sentences, config)
        } else {
            self.split_oversized(text, config)
        }
    }

    /// Tier 1: greedily packs sentences, flushing once a unit reaches
    /// `min_chars` or the next sentence would overflow `max_chars`.
    fn pack_sentences(&self, sentences: &[&str], config: &SegmentationConfig) -> Vec<String> {
        let max = config.max_chars();
        let mut units = Vec::new();
        let mut buffer = String::new();

        for sentence in sentences {
            let sentence_len = char_len(sentence);
            if sentence_len > max {
                flush(&mut units, &mut buffer);
                units.extend(self.split_oversized(sentence, config));
                continue;
            }

            if buffer.is_empty() {
                buffer.push_str(sentence);
            } else if char_len(&buffer) + 1 + sentence_len <= max {
                buffer.push(' ');
                buffer.push_str(sentence);
            } else {
                flush(&mut units, &mut buffer);
                buffer.push_str(sentence);
            }

            if char_len(&buffer) >= config.min_chars() {
                flush(&mut units, &mut buffer);
            }
        }

        flush(&mut units, &mut buffer);
        units
    }

    /// Tiers 2 to 5 for a piece that has no usable sentence boundary.
    fn split_oversized(&self, text: &str, config: &SegmentationConfig) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let max = config.max_chars();
        if char_len(text) <= max {
            return vec![text.to_string()];
        }

        if let Some(at) = latest_pause_point(text, max) {
            return self.split_at(text, at, config);
        }
        if let Some(at) = self.latest_conjunction(text, max) {
            return self.split_at(text, at, config);
        }
        pack_words(text, max)
    }

    fn split_at(&self, text: &str, at: usize, config: &SegmentationConfig) -> Vec<String> {
        let (head, tail) = text.split_at(at);
        let mut units = self.split_oversized(head, config);
        units.extend(self.split_oversized(tail, config));
        units
    }

    /// Tier 3: byte offset of the latest whole-word conjunction whose
    /// preceding text fits in `max` characters. The conjunction opens the
    /// second half.
    fn latest_conjunction(&self, text: &str, max: usize) -> Option<usize> {
        word_spans(text)
            .into_iter()
            .filter(|(start, _)| *start > 0)
            .filter(|(_, word)| self.is_conjunction(word))
            .filter(|(start, _)| {
                let head = text[..*start].trim_end();
                !head.is_empty() && char_len(head) <= max
            })
            .map(|(start, _)| start)
            .last()
    }

    fn is_conjunction(&self, word: &str) -> bool {
        let bare = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        self.conjunctions.iter().any(|c| *c == bare)
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self {
            conjunctions: DEFAULT_CONJUNCTIONS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn flush(units: &mut Vec<String>, buffer: &mut String) {
    if !buffer.is_empty() {
        units.push(std::mem::take(buffer));
    }
}

/// Splits on `.`, `!` or `?` followed by whitespace; punctuation stays with
/// its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                push_trimmed(&mut sentences, &text[start..idx + ch.len_utf8()]);
                start = next_idx;
            }
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(parts: &mut Vec<&'a str>, part: &'a str) {
    let part = part.trim();
    if !part.is_empty() {
        parts.push(part);
    }
}

/// Tier 2: byte offset just past the latest `,`/`:`/`;` that is followed by
/// whitespace and whose head (punctuation included) fits in `max` characters.
fn latest_pause_point(text: &str, max: usize) -> Option<usize> {
    let mut best = None;
    let mut chars = text.char_indices().enumerate().peekable();

    while let Some((position, (idx, ch))) = chars.next() {
        if position + 1 > max {
            break;
        }
        if !matches!(ch, ',' | ':' | ';') {
            continue;
        }
        if let Some(&(_, (_, next))) = chars.peek() {
            if next.is_whitespace() {
                best = Some(idx + ch.len_utf8());
            }
        }
    }
    best
}

/// Whitespace-delimited words with their starting byte offsets.
fn word_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, &text[s..idx]));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &text[s..]));
    }
    spans
}

/// Tiers 4 and 5: packs whole words; a word longer than `max` stands alone.
fn pack_words(text: &str, max: usize) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        if current.is_empty() {
            current.push_str(word);
        } else if char_len(&current) + 1 + word_len <= max {
            current.push(' ');
            current.push_str(word);
        } else {
            units.push(std::mem::take(&mut current));
            current.push_str(word);
        }
        if word_len > max {
            units.push(std::mem::take(&mut current));
        }
    }
    flush(&mut units, &mut current);
    units
}
