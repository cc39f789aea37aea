//! Tenant Profile Source Port - Lookup of loaded tenant profiles.

use std::sync::Arc;

use crate::domain::foundation::TenantId;
use crate::domain::tenant::TenantProfile;

/// Read-only access to validated tenant profiles.
///
/// Profiles are loaded and validated up front; lookups never fail, an
/// unknown tenant is simply absent.
pub trait TenantProfileSource: Send + Sync {
    fn profile(&self, tenant: &TenantId) -> Option<Arc<TenantProfile>>;

    /// Known tenants, sorted.
    fn tenant_ids(&self) -> Vec<TenantId>;
}
