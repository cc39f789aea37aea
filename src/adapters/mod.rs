//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to the outside world:
//! - `memory` - In-process session store
//! - `tenant` - Tenant documents loaded from disk
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod tenant;

pub use memory::InMemorySessionStore;
pub use tenant::{FileTenantLoader, TenantLoadError};
