//! Keyword-triggered extraction of field values from user utterances.
//!
//! Each field type maps to one [`ExtractionRule`]: an extractor that finds a
//! candidate value near the matched trigger, and a validator the candidate
//! must pass. Failing candidates are dropped, never reported.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::field::FieldType;
use super::schema::{CompiledField, FieldSchema};

/// Text following a trigger, up to the next sentence terminator.
static CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[:=]?\s*([^.!?;]+)").expect("clause regex is valid"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex is valid")
});
static PHONE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{6,}\d").expect("phone regex is valid"));
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("integer regex is valid"));

const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

type ExtractFn = fn(&CompiledField, &TriggerMatch<'_>) -> Option<String>;
type ValidateFn = fn(&CompiledField, &str) -> bool;

/// How one field type is extracted and validated.
struct ExtractionRule {
    field_type: FieldType,
    extract: ExtractFn,
    validate: ValidateFn,
}

const RULES: &[ExtractionRule] = &[
    ExtractionRule {
        field_type: FieldType::Text,
        extract: extract_text,
        validate: validate_text,
    },
    ExtractionRule {
        field_type: FieldType::Choice,
        extract: extract_choice,
        validate: validate_choice,
    },
    ExtractionRule {
        field_type: FieldType::Number,
        extract: extract_number,
        validate: validate_number,
    },
    ExtractionRule {
        field_type: FieldType::Email,
        extract: extract_email,
        validate: validate_email,
    },
    ExtractionRule {
        field_type: FieldType::Phone,
        extract: extract_phone,
        validate: validate_phone,
    },
];

/// Location of the anchoring trigger inside the utterance. `end` is the
/// end of the word the trigger matched in ("negócio" spans "negócios").
struct TriggerMatch<'u> {
    utterance: &'u str,
    start: usize,
    end: usize,
}

impl<'u> TriggerMatch<'u> {
    fn before(&self) -> &'u str {
        &self.utterance[..self.start]
    }

    fn after(&self) -> &'u str {
        &self.utterance[self.end..]
    }
}

/// Extracts captured-field candidates from a single utterance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetExtractor;

impl TargetExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns only values that passed every validation step, keyed by
    /// field name. Never fails; worst case is an empty map.
    pub fn extract(&self, utterance: &str, schema: &FieldSchema) -> BTreeMap<String, String> {
        let mut extracted = BTreeMap::new();
        if utterance.trim().is_empty() {
            return extracted;
        }

        for field in schema.compiled_fields() {
            let Some(anchor) = locate_trigger(utterance, field) else {
                continue;
            };
            let Some(rule) = RULES
                .iter()
                .find(|rule| rule.field_type == field.definition.field_type)
            else {
                continue;
            };
            let Some(candidate) = (rule.extract)(field, &anchor) else {
                continue;
            };

            if !(rule.validate)(field, &candidate) || !matches_pattern(field, &candidate) {
                debug!(
                    field = %field.definition.name,
                    field_type = %field.definition.field_type,
                    "Dropping extracted value that failed validation"
                );
                continue;
            }

            extracted.insert(field.definition.name.clone(), candidate);
        }

        extracted
    }
}

/// First trigger, in keyword order, that occurs in the utterance.
fn locate_trigger<'u>(utterance: &'u str, field: &CompiledField) -> Option<TriggerMatch<'u>> {
    field.triggers.iter().find_map(|trigger| {
        trigger.find(utterance).map(|m| TriggerMatch {
            utterance,
            start: m.start(),
            end: word_end(utterance, m.end()),
        })
    })
}

/// Extends `end` over the rest of a word cut by the trigger match.
fn word_end(utterance: &str, end: usize) -> usize {
    let inside_word = utterance[..end]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    if !inside_word {
        return end;
    }
    utterance[end..]
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map_or(utterance.len(), |(offset, _)| end + offset)
}

fn matches_pattern(field: &CompiledField, value: &str) -> bool {
    field
        .validation
        .as_ref()
        .map_or(true, |pattern| pattern.is_match(value))
}

// --- text -----------------------------------------------------------------

/// Clause after the trigger; a bare quantity right before the trigger is
/// kept ("80 clientes por mês"). The value is always a slice of the
/// utterance.
fn extract_text(_field: &CompiledField, anchor: &TriggerMatch<'_>) -> Option<String> {
    let clause = CLAUSE
        .captures(anchor.after())
        .and_then(|caps| caps.get(1))
        .and_then(|m| {
            let text = m.as_str();
            let start = anchor.end + m.start() + (text.len() - text.trim_start().len());
            let end = anchor.end + m.start() + text.trim_end().len();
            (end > start).then_some((start, end))
        });

    let start = quantity_start(anchor.before()).or(clause.map(|(start, _)| start))?;
    let end = clause.map_or(anchor.end, |(_, end)| end);
    Some(anchor.utterance[start..end].to_string())
}

/// Byte offset of an all-digit token directly before the trigger.
fn quantity_start(before: &str) -> Option<usize> {
    if !before.ends_with(char::is_whitespace) {
        return None;
    }
    let trimmed = before.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let token = &trimmed[start..];
    (!token.is_empty() && token.chars().all(|c| c.is_ascii_digit())).then_some(start)
}

fn validate_text(_field: &CompiledField, value: &str) -> bool {
    !value.trim().is_empty()
}

// --- choice ---------------------------------------------------------------

/// First choice, in schema order, found in the utterance. Occurrences that
/// stand alone win over ones embedded in a longer token ("1-5" inside
/// "21-50").
fn extract_choice(field: &CompiledField, anchor: &TriggerMatch<'_>) -> Option<String> {
    let haystack = anchor.utterance.to_lowercase();
    let choices = &field.definition.choices;
    let lowered: Vec<String> = choices.iter().map(|c| c.to_lowercase()).collect();

    let standalone = lowered
        .iter()
        .position(|choice| contains_standalone(&haystack, choice));
    let index = standalone.or_else(|| {
        lowered
            .iter()
            .position(|choice| !choice.is_empty() && haystack.contains(choice.as_str()))
    })?;

    choices.get(index).cloned()
}

fn contains_standalone(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn validate_choice(field: &CompiledField, value: &str) -> bool {
    field.definition.choices.iter().any(|choice| choice == value)
}

// --- number ---------------------------------------------------------------

/// First integer in the clause after the trigger, else the last integer in
/// the clause before it.
fn extract_number(_field: &CompiledField, anchor: &TriggerMatch<'_>) -> Option<String> {
    let after = anchor
        .after()
        .split(SENTENCE_TERMINATORS)
        .next()
        .unwrap_or_default();
    if let Some(m) = INTEGER.find(after) {
        return Some(m.as_str().to_string());
    }

    let before = anchor
        .before()
        .rsplit(SENTENCE_TERMINATORS)
        .next()
        .unwrap_or_default();
    INTEGER
        .find_iter(before)
        .last()
        .map(|m| m.as_str().to_string())
}

fn validate_number(_field: &CompiledField, value: &str) -> bool {
    value.parse::<u64>().is_ok()
}

// --- email ----------------------------------------------------------------

fn extract_email(_field: &CompiledField, anchor: &TriggerMatch<'_>) -> Option<String> {
    anchor
        .after()
        .split_whitespace()
        .chain(anchor.utterance.split_whitespace())
        .map(trim_token)
        .find(|token| token.contains('@'))
        .map(str::to_string)
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| {
        matches!(c, ',' | ';' | ':' | '!' | '?' | '.' | '(' | ')' | '<' | '>' | '"' | '\'')
    })
}

fn validate_email(_field: &CompiledField, value: &str) -> bool {
    EMAIL.is_match(value)
}

// --- phone ----------------------------------------------------------------

/// Digits of the first phone-like run after the trigger, else anywhere.
fn extract_phone(_field: &CompiledField, anchor: &TriggerMatch<'_>) -> Option<String> {
    PHONE_RUN
        .find(anchor.after())
        .or_else(|| PHONE_RUN.find(anchor.utterance))
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
}

fn validate_phone(_field: &CompiledField, value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit()) && matches!(value.len(), 10 | 11)
}
