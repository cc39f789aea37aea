//! Service-wide segmentation defaults

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::segmentation::SegmentationConfig;

/// Bounds used for tenants whose document declares none
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationDefaults {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl SegmentationDefaults {
    /// Validated domain bounds
    pub fn to_config(&self) -> Result<SegmentationConfig, ValidationError> {
        SegmentationConfig::new(self.min_chars, self.max_chars).map_err(|_| {
            ValidationError::InvalidSegmentationBounds {
                min: self.min_chars,
                max: self.max_chars,
            }
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_config().map(|_| ())
    }
}

impl Default for SegmentationDefaults {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            max_chars: default_max_chars(),
        }
    }
}

fn default_min_chars() -> usize {
    120
}

fn default_max_chars() -> usize {
    200
}
