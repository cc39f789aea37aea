//! Tenant profile: everything the core needs to serve one tenant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::capture::{
    FieldSchema, FieldSchemaDocument, PhaseClassifier, PhasePolicy, SchemaError, SchemaTemplate,
};
use crate::domain::foundation::TenantId;
use crate::domain::segmentation::SegmentationConfig;

/// Serialized tenant document (`tenant.json` / `tenant.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDocument {
    /// Defaults to the directory the document was found in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Falls back to the service-wide default bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<SegmentationConfig>,

    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub capture: Option<FieldSchemaDocument>,

    /// Used when no `capture` section is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<SchemaTemplate>,

    #[serde(default)]
    pub phase_policy: PhasePolicy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

/// Validated, immutable configuration of one tenant.
#[derive(Debug, Clone)]
pub struct TenantProfile {
    tenant_id: TenantId,
    display_name: String,
    segmentation: SegmentationConfig,
    schema: Arc<FieldSchema>,
    phase_policy: PhasePolicy,
    formatter: Option<String>,
}

impl TenantProfile {
    /// Profile with default bounds, default phase policy and the default
    /// formatter.
    pub fn new(schema: FieldSchema) -> Self {
        let tenant_id = schema.tenant_id().clone();
        Self {
            display_name: tenant_id.to_string(),
            tenant_id,
            segmentation: SegmentationConfig::default(),
            schema: Arc::new(schema),
            phase_policy: PhasePolicy::default(),
            formatter: None,
        }
    }

    /// Validates a tenant document.
    pub fn from_document(
        tenant_id: TenantId,
        document: TenantDocument,
        default_segmentation: SegmentationConfig,
    ) -> Result<Self, SchemaError> {
        let capture = match (document.capture, document.template) {
            (Some(capture), _) => capture,
            (None, Some(template)) => template.document(&tenant_id),
            (None, None) => FieldSchemaDocument::default(),
        };
        let schema = FieldSchema::from_document(tenant_id.clone(), capture)?;
        document.phase_policy.validate(&schema)?;

        Ok(Self {
            display_name: document
                .display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| tenant_id.to_string()),
            tenant_id,
            segmentation: document.segmentation.unwrap_or(default_segmentation),
            schema: Arc::new(schema),
            phase_policy: document.phase_policy,
            formatter: document.formatter.filter(|name| !name.trim().is_empty()),
        })
    }

    pub fn with_segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn with_phase_policy(mut self, policy: PhasePolicy) -> Result<Self, SchemaError> {
        policy.validate(&self.schema)?;
        self.phase_policy = policy;
        Ok(self)
    }

    pub fn with_formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter = Some(name.into());
        self
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn segmentation(&self) -> &SegmentationConfig {
        &self.segmentation
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    pub fn phase_policy(&self) -> &PhasePolicy {
        &self.phase_policy
    }

    pub fn phase_classifier(&self) -> PhaseClassifier {
        PhaseClassifier::new(self.phase_policy.clone())
    }

    /// Registry name of the formatter, if the tenant picked one.
    pub fn formatter(&self) -> Option<&str> {
        self.formatter.as_deref()
    }
}
