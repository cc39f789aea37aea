//! Tenant profiles and pluggable components.

mod profile;
mod registry;

pub use profile::{TenantDocument, TenantProfile};
pub use registry::{ComponentKind, ComponentRegistry, FormatterFactory};
