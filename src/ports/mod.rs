//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Per-session capture state persistence
//! - `TenantProfileSource` - Lookup of validated tenant profiles

mod session_store;
mod tenant_source;

pub use session_store::{SessionStore, SessionStoreError};
pub use tenant_source::TenantProfileSource;
