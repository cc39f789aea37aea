//! Per-tenant bounds for outbound message units.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const DEFAULT_MIN_CHARS: usize = 120;
const DEFAULT_MAX_CHARS: usize = 200;

/// Length bounds, in characters, for one outbound chat bubble.
///
/// Invariant: `0 < min_chars <= max_chars`. Deserialization goes through
/// [`SegmentationConfig::new`] so a tenant document cannot smuggle in
/// inverted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSegmentationConfig")]
pub struct SegmentationConfig {
    min_chars: usize,
    max_chars: usize,
}

#[derive(Deserialize)]
struct RawSegmentationConfig {
    #[serde(default = "default_min_chars")]
    min_chars: usize,
    #[serde(default = "default_max_chars")]
    max_chars: usize,
}

impl SegmentationConfig {
    /// Creates validated bounds.
    pub fn new(min_chars: usize, max_chars: usize) -> Result<Self, ValidationError> {
        if min_chars == 0 {
            return Err(ValidationError::out_of_range(
                "min_chars",
                1,
                clamp_i32(max_chars),
                0,
            ));
        }
        if min_chars > max_chars {
            return Err(ValidationError::out_of_range(
                "min_chars",
                1,
                clamp_i32(max_chars),
                clamp_i32(min_chars),
            ));
        }
        Ok(Self {
            min_chars,
            max_chars,
        })
    }

    /// Preferred minimum length of a packed unit.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Hard upper bound of a unit (irreducible tokens excepted).
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl TryFrom<RawSegmentationConfig> for SegmentationConfig {
    type Error = ValidationError;

    fn try_from(raw: RawSegmentationConfig) -> Result<Self, Self::Error> {
        Self::new(raw.min_chars, raw.max_chars)
    }
}

fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn clamp_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_120_to_200() {
        let config = SegmentationConfig::default();
        assert_eq!(config.min_chars(), 120);
        assert_eq!(config.max_chars(), 200);
    }

    #[test]
    fn accepts_equal_bounds() {
        assert!(SegmentationConfig::new(80, 80).is_ok());
    }

    #[test]
    fn rejects_zero_minimum() {
        assert!(SegmentationConfig::new(0, 100).is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = SegmentationConfig::new(150, 100).unwrap_err();
        assert_eq!(err.field(), "min_chars");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: SegmentationConfig = serde_json::from_str(r#"{"max_chars": 300}"#).unwrap();
        assert_eq!(config.min_chars(), 120);
        assert_eq!(config.max_chars(), 300);
    }

    #[test]
    fn deserialization_rejects_inverted_bounds() {
        let result = serde_json::from_str::<SegmentationConfig>(
            r#"{"min_chars": 200, "max_chars": 120}"#,
        );
        assert!(result.is_err());
    }
}
