//! Capturable field definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of value types a field can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Choice,
    Number,
    Email,
    Phone,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Choice => "choice",
            Self::Number => "number",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One capturable piece of information.
///
/// Tenant documents may use the legacy key names `field_name`,
/// `field_type` and `prompt_triggers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(alias = "field_name")]
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "type", alias = "field_type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_pattern: Option<String>,

    #[serde(default, alias = "prompt_triggers")]
    pub trigger_keywords: Vec<String>,
}

impl FieldDefinition {
    /// Creates an optional field with no triggers; display name defaults to
    /// the field name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            field_type,
            required: false,
            choices: Vec::new(),
            validation_pattern: None,
            trigger_keywords: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_keywords = triggers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_validation_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.validation_pattern = Some(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_parts() {
        let field = FieldDefinition::new("porte", FieldType::Choice)
            .required()
            .with_display_name("Porte")
            .with_choices(["pequeno", "médio"])
            .with_triggers(["funcionários"])
            .with_validation_pattern("[a-zé]+");

        assert_eq!(field.name, "porte");
        assert_eq!(field.display_name, "Porte");
        assert!(field.required);
        assert_eq!(field.choices, vec!["pequeno", "médio"]);
        assert_eq!(field.trigger_keywords, vec!["funcionários"]);
        assert_eq!(field.validation_pattern.as_deref(), Some("[a-zé]+"));
    }

    #[test]
    fn display_name_defaults_to_name() {
        let field = FieldDefinition::new("email", FieldType::Email);
        assert_eq!(field.display_name, "email");
        assert!(!field.required);
    }

    #[test]
    fn deserializes_current_key_names() {
        let json = r#"{
            "name": "volume",
            "type": "number",
            "required": true,
            "trigger_keywords": ["clientes"]
        }"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Number);
        assert_eq!(field.trigger_keywords, vec!["clientes"]);
    }

    #[test]
    fn deserializes_legacy_key_names() {
        let json = r#"{
            "field_name": "tipo_negocio",
            "display_name": "Tipo de Negócio",
            "field_type": "text",
            "prompt_triggers": ["negócio", "empresa"]
        }"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "tipo_negocio");
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.trigger_keywords, vec!["negócio", "empresa"]);
    }

    #[test]
    fn rejects_unknown_field_type() {
        let json = r#"{"name": "x", "type": "date"}"#;
        assert!(serde_json::from_str::<FieldDefinition>(json).is_err());
    }

    #[test]
    fn field_type_displays_as_snake_case() {
        assert_eq!(FieldType::Phone.to_string(), "phone");
    }
}
