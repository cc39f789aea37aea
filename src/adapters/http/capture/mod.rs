//! HTTP adapter for session capture.

mod dto;
mod handlers;
mod routes;

pub use dto::{CaptureSnapshotResponse, TurnRequest};
pub use handlers::CaptureHandlers;
pub use routes::capture_routes;
