//! Per-tenant catalog of capturable fields.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::{FieldDefinition, FieldType};
use crate::domain::foundation::{TenantId, ValidationError};

/// Errors raised while loading a schema or tenant profile.
///
/// A broken schema would silently corrupt extraction for a whole tenant,
/// so every variant is fatal at load time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Target name must not be empty")]
    EmptyTarget,

    #[error("Field at position {position} has an empty name")]
    EmptyFieldName { position: usize },

    #[error("Duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("Choice field '{0}' declares no choices")]
    EmptyChoices(String),

    #[error("Field '{0}' declares choices but is not a choice field")]
    UnexpectedChoices(String),

    #[error("Field '{field}' has an empty trigger keyword")]
    EmptyTrigger { field: String },

    #[error("Field '{field}' has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("Invalid phase policy: {0}")]
    InvalidPhasePolicy(String),

    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValidationError),
}

/// Serialized form of a schema, as found in tenant documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchemaDocument {
    /// Defaults to `<tenant_id>_target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    #[serde(default)]
    pub completion_triggers: Vec<String>,

    #[serde(default = "default_auto_capture")]
    pub auto_capture: bool,
}

impl Default for FieldSchemaDocument {
    fn default() -> Self {
        Self {
            target_name: None,
            description: String::new(),
            fields: Vec::new(),
            completion_triggers: Vec::new(),
            auto_capture: true,
        }
    }
}

fn default_auto_capture() -> bool {
    true
}

/// A field with its trigger and validation patterns compiled once.
#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) definition: FieldDefinition,
    /// Case-insensitive literal matchers, in keyword order.
    pub(crate) triggers: Vec<Regex>,
    /// Full-match form of `validation_pattern`.
    pub(crate) validation: Option<Regex>,
}

/// Immutable, validated field catalog of one tenant.
///
/// Shared read-only across sessions (wrap in `Arc`).
#[derive(Debug, Clone)]
pub struct FieldSchema {
    tenant_id: TenantId,
    target_name: String,
    description: String,
    fields: Vec<CompiledField>,
    completion_triggers: Vec<String>,
    auto_capture: bool,
}

impl FieldSchema {
    /// Builds a schema from field definitions with default metadata.
    pub fn new(
        tenant_id: TenantId,
        target_name: impl Into<String>,
        fields: Vec<FieldDefinition>,
        completion_triggers: Vec<String>,
    ) -> Result<Self, SchemaError> {
        Self::from_document(
            tenant_id,
            FieldSchemaDocument {
                target_name: Some(target_name.into()),
                fields,
                completion_triggers,
                ..FieldSchemaDocument::default()
            },
        )
    }

    /// Validates a document and compiles its patterns.
    pub fn from_document(
        tenant_id: TenantId,
        document: FieldSchemaDocument,
    ) -> Result<Self, SchemaError> {
        let target_name = match document.target_name {
            Some(name) => name.trim().to_string(),
            None => format!("{}_target", tenant_id),
        };
        if target_name.is_empty() {
            return Err(SchemaError::EmptyTarget);
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(document.fields.len());
        for (position, definition) in document.fields.into_iter().enumerate() {
            let compiled = compile_field(position, definition)?;
            if !seen.insert(compiled.definition.name.clone()) {
                return Err(SchemaError::DuplicateField(compiled.definition.name));
            }
            fields.push(compiled);
        }

        let mut completion_triggers = Vec::with_capacity(document.completion_triggers.len());
        for trigger in document.completion_triggers {
            let trigger = trigger.trim().to_lowercase();
            if trigger.is_empty() {
                return Err(SchemaError::EmptyTrigger {
                    field: "completion_triggers".to_string(),
                });
            }
            completion_triggers.push(trigger);
        }

        Ok(Self {
            tenant_id,
            target_name,
            description: document.description.trim().to_string(),
            fields,
            completion_triggers,
            auto_capture: document.auto_capture,
        })
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether extraction should run automatically on every turn.
    pub fn auto_capture(&self) -> bool {
        self.auto_capture
    }

    pub fn completion_triggers(&self) -> &[String] {
        &self.completion_triggers
    }

    /// Field definitions in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.fields.iter().map(|f| &f.definition)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.name == name)
    }

    /// Required fields in schema order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.fields().filter(|f| f.required)
    }

    /// True when every required field has a non-empty captured value.
    pub fn is_complete(&self, captured: &BTreeMap<String, String>) -> bool {
        self.required_fields().all(|f| has_value(captured, &f.name))
    }

    /// First absent required field, else first absent optional field.
    pub fn next_suggested_field(
        &self,
        captured: &BTreeMap<String, String>,
    ) -> Option<&FieldDefinition> {
        self.required_fields()
            .find(|f| !has_value(captured, &f.name))
            .or_else(|| self.fields().find(|f| !has_value(captured, &f.name)))
    }

    /// True if the utterance contains any completion trigger, ignoring case.
    pub fn mentions_completion_trigger(&self, utterance: &str) -> bool {
        if self.completion_triggers.is_empty() {
            return false;
        }
        let lowered = utterance.to_lowercase();
        self.completion_triggers
            .iter()
            .any(|trigger| lowered.contains(trigger.as_str()))
    }

    pub(crate) fn compiled_fields(&self) -> &[CompiledField] {
        &self.fields
    }
}

pub(crate) fn has_value(captured: &BTreeMap<String, String>, name: &str) -> bool {
    captured
        .get(name)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false)
}

fn compile_field(position: usize, mut definition: FieldDefinition) -> Result<CompiledField, SchemaError> {
    definition.name = definition.name.trim().to_string();
    if definition.name.is_empty() {
        return Err(SchemaError::EmptyFieldName { position });
    }
    if definition.display_name.trim().is_empty() {
        definition.display_name = definition.name.clone();
    }

    let is_choice = definition.field_type == FieldType::Choice;
    if is_choice && definition.choices.is_empty() {
        return Err(SchemaError::EmptyChoices(definition.name));
    }
    if !is_choice && !definition.choices.is_empty() {
        return Err(SchemaError::UnexpectedChoices(definition.name));
    }

    let mut triggers = Vec::with_capacity(definition.trigger_keywords.len());
    for keyword in &definition.trigger_keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SchemaError::EmptyTrigger {
                field: definition.name.clone(),
            });
        }
        let matcher = Regex::new(&format!("(?i){}", regex::escape(keyword))).map_err(|e| {
            SchemaError::InvalidPattern {
                field: definition.name.clone(),
                reason: e.to_string(),
            }
        })?;
        triggers.push(matcher);
    }

    let validation = match &definition.validation_pattern {
        Some(pattern) => Some(Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            SchemaError::InvalidPattern {
                field: definition.name.clone(),
                reason: e.to_string(),
            }
        })?),
        None => None,
    };

    Ok(CompiledField {
        definition,
        triggers,
        validation,
    })
}
