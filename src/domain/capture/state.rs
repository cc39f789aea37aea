//! Per-session capture accumulator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::FieldDefinition;
use super::schema::{has_value, FieldSchema};
use crate::domain::foundation::{Percentage, SessionKey, Timestamp};

/// What a single [`CaptureState::update`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureUpdate {
    /// Fields captured for the first time.
    pub newly_captured: Vec<String>,
    /// Fields whose previous value was replaced by a different one.
    pub overwritten: Vec<String>,
    /// True only on the turn that made the state complete.
    pub completed_now: bool,
}

impl CaptureUpdate {
    pub fn is_empty(&self) -> bool {
        self.newly_captured.is_empty() && self.overwritten.is_empty() && !self.completed_now
    }
}

/// Captured values of one conversation session.
///
/// `completed_at` is stamped once, on the transition to complete, and is
/// cleared only if an explicit removal or reset makes the state incomplete
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureState {
    session_id: SessionKey,
    captured_fields: BTreeMap<String, String>,
    is_complete: bool,
    completed_at: Option<Timestamp>,
}

impl CaptureState {
    /// Empty state for a session.
    pub fn new(session_id: SessionKey) -> Self {
        Self {
            session_id,
            captured_fields: BTreeMap::new(),
            is_complete: false,
            completed_at: None,
        }
    }

    pub fn session_id(&self) -> &SessionKey {
        &self.session_id
    }

    pub fn captured_fields(&self) -> &BTreeMap<String, String> {
        &self.captured_fields
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Merges extracted values (last write wins) and recomputes completion.
    pub fn update(
        &mut self,
        schema: &FieldSchema,
        extracted: &BTreeMap<String, String>,
    ) -> CaptureUpdate {
        let mut outcome = CaptureUpdate::default();

        for (name, value) in extracted {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match self.captured_fields.insert(name.clone(), value.to_string()) {
                None => outcome.newly_captured.push(name.clone()),
                Some(previous) if previous != value => outcome.overwritten.push(name.clone()),
                Some(_) => {}
            }
        }

        outcome.completed_now = self.recompute(schema);
        outcome
    }

    /// Removes one captured value. Returns the removed value.
    pub fn remove_field(&mut self, schema: &FieldSchema, name: &str) -> Option<String> {
        let removed = self.captured_fields.remove(name);
        if removed.is_some() {
            self.recompute(schema);
        }
        removed
    }

    /// Clears every captured value.
    pub fn reset(&mut self) {
        self.captured_fields.clear();
        self.is_complete = false;
        self.completed_at = None;
    }

    /// First missing required field, else first missing optional field.
    pub fn next_suggested_field<'s>(&self, schema: &'s FieldSchema) -> Option<&'s FieldDefinition> {
        schema.next_suggested_field(&self.captured_fields)
    }

    /// Required fields still missing, in schema order.
    pub fn missing_required<'s>(&self, schema: &'s FieldSchema) -> Vec<&'s FieldDefinition> {
        schema
            .required_fields()
            .filter(|f| !has_value(&self.captured_fields, &f.name))
            .collect()
    }

    /// Share of required fields captured; 100% when nothing is required.
    pub fn completion_percentage(&self, schema: &FieldSchema) -> Percentage {
        let total = schema.required_fields().count();
        let captured = schema
            .required_fields()
            .filter(|f| has_value(&self.captured_fields, &f.name))
            .count();
        Percentage::from_ratio(captured, total)
    }

    /// Returns true if this call flipped the state to complete.
    fn recompute(&mut self, schema: &FieldSchema) -> bool {
        let complete = schema.is_complete(&self.captured_fields);
        let flipped = complete && !self.is_complete;

        if flipped {
            self.completed_at = Some(Timestamp::now());
        } else if !complete {
            self.completed_at = None;
        }
        self.is_complete = complete;

        flipped
    }
}
