//! Capture handlers: per-turn extraction, state reads and explicit resets.

mod capture_turn;
mod clear_session;
mod errors;
mod get_capture_state;
mod snapshot;

pub use capture_turn::{CaptureTurnCommand, CaptureTurnHandler};
pub use clear_session::{ClearSessionCommand, ClearSessionHandler};
pub use errors::CaptureError;
pub use get_capture_state::{GetCaptureStateHandler, GetCaptureStateQuery};
pub use snapshot::CaptureSnapshot;
