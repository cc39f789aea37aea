//! HTTP adapter for response assembly.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssembleRequest, AssembledResponseDto};
pub use handlers::ResponseHandlers;
pub use routes::response_routes;
