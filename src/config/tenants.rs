//! Tenant loading configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::capture::SchemaTemplate;
use crate::domain::foundation::TenantId;

/// Where tenant documents live and which tenant always exists
#[derive(Debug, Clone, Deserialize)]
pub struct TenantsConfig {
    /// Directory holding `<tenant_id>/tenant.json|tenant.yaml`
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Tenant created from `default_template` when absent on disk
    #[serde(default = "default_tenant")]
    pub default_tenant: String,

    #[serde(default = "default_template")]
    pub default_template: SchemaTemplate,
}

impl TenantsConfig {
    pub fn default_tenant_id(&self) -> Result<TenantId, ValidationError> {
        TenantId::new(self.default_tenant.as_str()).map_err(|_| ValidationError::InvalidDefaultTenant)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default_tenant_id().map(|_| ())
    }
}

impl Default for TenantsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            default_tenant: default_tenant(),
            default_template: default_template(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("tenants")
}

fn default_tenant() -> String {
    "default".to_string()
}

fn default_template() -> SchemaTemplate {
    SchemaTemplate::Generic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenants_config_defaults() {
        let config = TenantsConfig::default();
        assert_eq!(config.directory, PathBuf::from("tenants"));
        assert_eq!(config.default_tenant_id().unwrap().as_str(), "default");
        assert_eq!(config.default_template, SchemaTemplate::Generic);
    }

    #[test]
    fn test_blank_default_tenant_is_invalid() {
        let config = TenantsConfig {
            default_tenant: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDefaultTenant));
    }

    #[test]
    fn test_deserializes_template_name() {
        let json = r#"{"directory": "/etc/assistant/tenants", "default_template": "sales"}"#;
        let config: TenantsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_template, SchemaTemplate::Sales);
        assert_eq!(config.default_tenant, "default");
    }
}
