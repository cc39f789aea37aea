//! Request and response bodies for response assembly.

use serde::{Deserialize, Serialize};

use crate::domain::response::{AssembledResponse, FormattingStrategy};

/// Body of `POST .../responses`
#[derive(Debug, Clone, Deserialize)]
pub struct AssembleRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssembledResponseDto {
    pub messages: Vec<String>,
    pub strategy: FormattingStrategy,
    pub item_count: usize,
    pub total_parts: usize,
}

impl From<AssembledResponse> for AssembledResponseDto {
    fn from(assembled: AssembledResponse) -> Self {
        let total_parts = assembled.total_parts();
        Self {
            messages: assembled.messages,
            strategy: assembled.strategy,
            item_count: assembled.item_count,
            total_parts,
        }
    }
}
