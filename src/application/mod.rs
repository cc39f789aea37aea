//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate session state under a per-session lock; query
//! handlers only read.

pub mod handlers;
mod session_locks;

pub use handlers::{
    // Capture handlers
    CaptureError, CaptureSnapshot, CaptureTurnCommand, CaptureTurnHandler,
    ClearSessionCommand, ClearSessionHandler, GetCaptureStateHandler, GetCaptureStateQuery,
    // Response handlers
    AssembleResponseCommand, AssembleResponseHandler,
};
pub use session_locks::SessionLocks;
