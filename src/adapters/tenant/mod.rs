//! Tenant profile adapters.

mod file_loader;

pub use file_loader::{FileTenantLoader, TenantLoadError};
