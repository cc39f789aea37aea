//! Filesystem tenant loader
//!
//! Reads one document per tenant from a configurable base directory:
//! `{base_dir}/{tenant_id}/tenant.json` (or `tenant.yaml` / `tenant.yml`).
//! Every document is validated at load time; a single broken tenant fails
//! the whole load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::capture::{SchemaError, SchemaTemplate};
use crate::domain::foundation::{TenantId, ValidationError};
use crate::domain::segmentation::SegmentationConfig;
use crate::domain::tenant::{TenantDocument, TenantProfile};
use crate::ports::TenantProfileSource;

const DOCUMENT_NAMES: [&str; 3] = ["tenant.json", "tenant.yaml", "tenant.yml"];

/// Errors that can occur while loading tenant documents
#[derive(Debug, Error)]
pub enum TenantLoadError {
    #[error("IO error at {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid tenant id: {0}")]
    InvalidTenantId(#[from] ValidationError),

    #[error("Invalid configuration for tenant '{tenant}': {source}")]
    Schema {
        tenant: String,
        #[source]
        source: SchemaError,
    },

    #[error("Tenant '{0}' is defined more than once")]
    DuplicateTenant(String),
}

/// Tenant profiles loaded from disk
#[derive(Debug, Clone, Default)]
pub struct FileTenantLoader {
    profiles: HashMap<TenantId, Arc<TenantProfile>>,
}

impl FileTenantLoader {
    /// Loads every tenant directory under `base_dir`.
    ///
    /// A missing base directory yields an empty loader. Subdirectories
    /// without a tenant document are skipped.
    pub async fn load_dir(
        base_dir: impl AsRef<Path>,
        default_segmentation: SegmentationConfig,
    ) -> Result<Self, TenantLoadError> {
        let base_dir = base_dir.as_ref();
        let mut loader = Self::default();

        if !fs::try_exists(base_dir).await.map_err(|e| io_error(base_dir, e))? {
            info!(path = %base_dir.display(), "Tenant directory does not exist, no tenants loaded");
            return Ok(loader);
        }

        let mut entries = fs::read_dir(base_dir).await.map_err(|e| io_error(base_dir, e))?;
        let mut tenant_dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(base_dir, e))? {
            let file_type = entry.file_type().await.map_err(|e| io_error(&entry.path(), e))?;
            if file_type.is_dir() {
                tenant_dirs.push(entry.path());
            }
        }
        tenant_dirs.sort();

        for dir in tenant_dirs {
            let Some(document_path) = find_document(&dir).await? else {
                debug!(path = %dir.display(), "Skipping directory without tenant document");
                continue;
            };
            let dir_name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let profile = Self::load_file(&document_path, &dir_name, default_segmentation).await?;
            loader.insert(profile)?;
        }

        info!(count = loader.profiles.len(), "Tenant profiles loaded");
        Ok(loader)
    }

    /// Loads one tenant document. `fallback_id` is used when the document
    /// does not name its tenant.
    pub async fn load_file(
        path: &Path,
        fallback_id: &str,
        default_segmentation: SegmentationConfig,
    ) -> Result<TenantProfile, TenantLoadError> {
        let content = fs::read_to_string(path).await.map_err(|e| io_error(path, e))?;
        let document = parse_document(path, &content)?;

        let raw_id = document
            .tenant_id
            .clone()
            .unwrap_or_else(|| fallback_id.to_string());
        let tenant_id = TenantId::new(raw_id)?;

        let profile = TenantProfile::from_document(tenant_id.clone(), document, default_segmentation)
            .map_err(|source| TenantLoadError::Schema {
                tenant: tenant_id.to_string(),
                source,
            })?;

        debug!(
            tenant_id = %tenant_id,
            fields = profile.schema().len(),
            path = %path.display(),
            "Tenant document loaded"
        );
        Ok(profile)
    }

    /// Adds a profile. Fails if the tenant is already present.
    pub fn insert(&mut self, profile: TenantProfile) -> Result<(), TenantLoadError> {
        let tenant_id = profile.tenant_id().clone();
        if self.profiles.contains_key(&tenant_id) {
            return Err(TenantLoadError::DuplicateTenant(tenant_id.to_string()));
        }
        self.profiles.insert(tenant_id, Arc::new(profile));
        Ok(())
    }

    /// Makes sure `tenant_id` exists, building it from `template` if absent.
    pub fn ensure_tenant(
        &mut self,
        tenant_id: TenantId,
        template: SchemaTemplate,
        default_segmentation: SegmentationConfig,
    ) -> Result<(), TenantLoadError> {
        if self.profiles.contains_key(&tenant_id) {
            return Ok(());
        }
        let schema = template
            .build(tenant_id.clone())
            .map_err(|source| TenantLoadError::Schema {
                tenant: tenant_id.to_string(),
                source,
            })?;
        info!(tenant_id = %tenant_id, template = %template, "Default tenant created from template");
        self.insert(TenantProfile::new(schema).with_segmentation(default_segmentation))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<TenantProfile> for FileTenantLoader {
    /// Later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = TenantProfile>>(iter: I) -> Self {
        let profiles = iter
            .into_iter()
            .map(|profile| (profile.tenant_id().clone(), Arc::new(profile)))
            .collect();
        Self { profiles }
    }
}

impl TenantProfileSource for FileTenantLoader {
    fn profile(&self, tenant: &TenantId) -> Option<Arc<TenantProfile>> {
        self.profiles.get(tenant).cloned()
    }

    fn tenant_ids(&self) -> Vec<TenantId> {
        let mut ids: Vec<TenantId> = self.profiles.keys().cloned().collect();
        ids.sort();
        ids
    }
}

async fn find_document(dir: &Path) -> Result<Option<PathBuf>, TenantLoadError> {
    for name in DOCUMENT_NAMES {
        let candidate = dir.join(name);
        if fs::try_exists(&candidate).await.map_err(|e| io_error(&candidate, e))? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn parse_document(path: &Path, content: &str) -> Result<TenantDocument, TenantLoadError> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| TenantLoadError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn io_error(path: &Path, error: std::io::Error) -> TenantLoadError {
    TenantLoadError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
