//! Capability-indexed registry of pluggable components.
//!
//! Components are registered at startup as factory closures keyed by
//! `(tenant, kind, name)`. A tenant-specific registration shadows a
//! tenant-agnostic one with the same name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::TenantId;
use crate::domain::response::{ResponseFormatter, StandardFormatter, WhatsAppFormatter};

/// Kinds of pluggable components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Formatter,
}

/// Builds a formatter instance.
pub type FormatterFactory = Arc<dyn Fn() -> Arc<dyn ResponseFormatter> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ComponentKey {
    tenant: Option<TenantId>,
    kind: ComponentKind,
    name: String,
}

impl ComponentKey {
    fn new(tenant: Option<TenantId>, kind: ComponentKind, name: &str) -> Self {
        Self {
            tenant,
            kind,
            name: name.trim().to_lowercase(),
        }
    }
}

/// Registry of formatter factories with a default fallback.
pub struct ComponentRegistry {
    formatters: HashMap<ComponentKey, FormatterFactory>,
    default_formatter: Arc<dyn ResponseFormatter>,
}

impl ComponentRegistry {
    /// Empty registry whose default is the standard formatter.
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
            default_formatter: Arc::new(StandardFormatter::default()),
        }
    }

    /// Registry with the built-in formatters registered for every tenant.
    pub fn with_builtin_formatters(enable_whatsapp: bool) -> Self {
        let mut registry = Self::new();
        registry.register_formatter(None, StandardFormatter::NAME, || {
            Arc::new(StandardFormatter::default())
        });
        if enable_whatsapp {
            registry.register_formatter(None, WhatsAppFormatter::NAME, || {
                Arc::new(WhatsAppFormatter::default())
            });
        }
        registry
    }

    /// Registers a formatter factory. `None` makes it available to every
    /// tenant.
    pub fn register_formatter<F>(&mut self, tenant: Option<TenantId>, name: &str, factory: F)
    where
        F: Fn() -> Arc<dyn ResponseFormatter> + Send + Sync + 'static,
    {
        self.formatters.insert(
            ComponentKey::new(tenant, ComponentKind::Formatter, name),
            Arc::new(factory),
        );
    }

    /// Replaces the formatter used when nothing else matches.
    pub fn set_default_formatter(&mut self, formatter: Arc<dyn ResponseFormatter>) {
        self.default_formatter = formatter;
    }

    pub fn default_formatter(&self) -> Arc<dyn ResponseFormatter> {
        Arc::clone(&self.default_formatter)
    }

    /// Tenant registration first, then tenant-agnostic, then the default.
    pub fn resolve_formatter(
        &self,
        tenant: &TenantId,
        name: Option<&str>,
    ) -> Arc<dyn ResponseFormatter> {
        let Some(name) = name else {
            return self.default_formatter();
        };

        let scoped = ComponentKey::new(Some(tenant.clone()), ComponentKind::Formatter, name);
        let shared = ComponentKey::new(None, ComponentKind::Formatter, name);

        match self.formatters.get(&scoped).or_else(|| self.formatters.get(&shared)) {
            Some(factory) => factory(),
            None => {
                warn!(
                    tenant_id = %tenant,
                    formatter = name,
                    "Unknown formatter, falling back to default"
                );
                self.default_formatter()
            }
        }
    }

    /// Formatter names visible to a tenant, sorted.
    pub fn formatter_names(&self, tenant: &TenantId) -> Vec<String> {
        let mut names: Vec<String> = self
            .formatters
            .keys()
            .filter(|key| key.kind == ComponentKind::Formatter)
            .filter(|key| key.tenant.is_none() || key.tenant.as_ref() == Some(tenant))
            .map(|key| key.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtin_formatters(true)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .field("default_formatter", &self.default_formatter.name())
            .finish()
    }
}
