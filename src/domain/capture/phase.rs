//! Conversation phase derived from what has been captured so far.
//!
//! The phase is never stored. It is recomputed every turn from the
//! captured fields and the tenant's [`PhasePolicy`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::{has_value, FieldSchema, SchemaError};

/// Coarse measure of how much is known about the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// Little is known yet.
    Discovery,
    /// The basics are known; dig deeper.
    Understanding,
    /// Enough is known to relate the offer to the user's situation.
    Positioning,
}

impl ConversationPhase {
    /// Default guidance injected into the assistant prompt for this phase.
    /// Tenants can replace it through [`PhasePolicy::directives`].
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Discovery => {
                "Faça perguntas diretas mas amigáveis. Mostre interesse genuíno no negócio \
                 do cliente e não mencione planos até entender as necessidades."
            }
            Self::Understanding => {
                "Aprofunde o entendimento das dores específicas e do volume de atendimento. \
                 Confirme o que o cliente já contou."
            }
            Self::Positioning => {
                "Use a descoberta prévia para personalizar a recomendação. \
                 Apresente valor antes de preço."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Understanding => "understanding",
            Self::Positioning => "positioning",
        }
    }
}

/// Tenant-tunable weights and thresholds for phase scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasePolicy {
    /// Defaults to the first required field, else the first field.
    pub primary_field: Option<String>,
    pub primary_weight: u32,
    /// Fields worth `tracked_weight` each. Empty means every non-primary
    /// schema field.
    pub tracked_fields: Vec<String>,
    pub tracked_weight: u32,
    /// Scores below this are discovery.
    pub understanding_threshold: u32,
    /// Scores below this (and at or above the previous one) are understanding.
    pub positioning_threshold: u32,
    /// Per-phase directive overrides, for tenants that talk in another
    /// language or tone.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub directives: BTreeMap<ConversationPhase, String>,
}

impl Default for PhasePolicy {
    fn default() -> Self {
        Self {
            primary_field: None,
            primary_weight: 2,
            tracked_fields: Vec::new(),
            tracked_weight: 1,
            understanding_threshold: 2,
            positioning_threshold: 4,
            directives: BTreeMap::new(),
        }
    }
}

impl PhasePolicy {
    /// Checks thresholds and that every named field exists in the schema.
    pub fn validate(&self, schema: &FieldSchema) -> Result<(), SchemaError> {
        if self.understanding_threshold > self.positioning_threshold {
            return Err(SchemaError::InvalidPhasePolicy(format!(
                "understanding_threshold ({}) exceeds positioning_threshold ({})",
                self.understanding_threshold, self.positioning_threshold
            )));
        }

        if let Some((phase, _)) = self.directives.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(SchemaError::InvalidPhasePolicy(format!(
                "blank directive for phase '{}'",
                phase.label()
            )));
        }

        let named = self.primary_field.iter().chain(self.tracked_fields.iter());
        for name in named {
            if schema.field(name).is_none() {
                return Err(SchemaError::InvalidPhasePolicy(format!(
                    "unknown field '{}'",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Scores captured fields against a [`PhasePolicy`].
#[derive(Debug, Clone, Default)]
pub struct PhaseClassifier {
    policy: PhasePolicy,
}

impl PhaseClassifier {
    pub fn new(policy: PhasePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PhasePolicy {
        &self.policy
    }

    /// Weighted score of the captured fields. Saturates at `u32::MAX`.
    pub fn score(&self, captured: &BTreeMap<String, String>, schema: &FieldSchema) -> u32 {
        let primary = self.primary_field(schema);

        let mut score: u32 = 0;
        if let Some(primary) = primary {
            if has_value(captured, primary) {
                score = score.saturating_add(self.policy.primary_weight);
            }
        }

        let tracked: Vec<&str> = if self.policy.tracked_fields.is_empty() {
            schema.fields().map(|f| f.name.as_str()).collect()
        } else {
            self.policy.tracked_fields.iter().map(String::as_str).collect()
        };

        for name in tracked {
            if Some(name) != primary && has_value(captured, name) {
                score = score.saturating_add(self.policy.tracked_weight);
            }
        }

        score
    }

    /// Phase for the captured fields.
    pub fn classify(
        &self,
        captured: &BTreeMap<String, String>,
        schema: &FieldSchema,
    ) -> ConversationPhase {
        let score = self.score(captured, schema);
        if score < self.policy.understanding_threshold {
            ConversationPhase::Discovery
        } else if score < self.policy.positioning_threshold {
            ConversationPhase::Understanding
        } else {
            ConversationPhase::Positioning
        }
    }

    /// Tenant override for the phase, else the built-in directive.
    pub fn directive(&self, phase: ConversationPhase) -> &str {
        self.policy
            .directives
            .get(&phase)
            .map_or_else(|| phase.directive(), String::as_str)
    }

    fn primary_field<'s>(&'s self, schema: &'s FieldSchema) -> Option<&'s str> {
        self.policy
            .primary_field
            .as_deref()
            .or_else(|| schema.required_fields().next().map(|f| f.name.as_str()))
            .or_else(|| schema.fields().next().map(|f| f.name.as_str()))
    }
}
