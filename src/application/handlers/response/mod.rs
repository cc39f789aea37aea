//! Response handlers.

mod assemble_response;

pub use assemble_response::{AssembleResponseCommand, AssembleResponseHandler};
