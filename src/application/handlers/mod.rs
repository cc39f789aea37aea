//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod capture;
pub mod response;

pub use capture::{
    CaptureError, CaptureSnapshot, CaptureTurnCommand, CaptureTurnHandler, ClearSessionCommand,
    ClearSessionHandler, GetCaptureStateHandler, GetCaptureStateQuery,
};
pub use response::{AssembleResponseCommand, AssembleResponseHandler};
