//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Register the WhatsApp markup formatter
    #[serde(default = "default_true")]
    pub enable_whatsapp_formatting: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_whatsapp_formatting: true,
            enable_tracing: true,
        }
    }
}

fn default_true() -> bool {
    true
}
