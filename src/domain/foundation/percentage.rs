//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
///
/// Used for completion telemetry ("3 of 4 required fields captured").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Computes `part / whole` as a percentage, rounding down.
    ///
    /// An empty whole counts as fully complete.
    pub fn from_ratio(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::HUNDRED;
        }
        let pct = (part.min(whole) * 100) / whole;
        Self(pct as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_over_100() {
        match Percentage::try_new(101) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "percentage");
                assert_eq!(actual, 101);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn from_ratio_rounds_down() {
        assert_eq!(Percentage::from_ratio(1, 3).value(), 33);
        assert_eq!(Percentage::from_ratio(2, 2), Percentage::HUNDRED);
        assert_eq!(Percentage::from_ratio(0, 4), Percentage::ZERO);
    }

    #[test]
    fn from_ratio_treats_empty_whole_as_complete() {
        assert_eq!(Percentage::from_ratio(0, 0), Percentage::HUNDRED);
    }

    #[test]
    fn from_ratio_clamps_part_to_whole() {
        assert_eq!(Percentage::from_ratio(5, 2), Percentage::HUNDRED);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::from_ratio(3, 4).to_string(), "75%");
    }

    #[test]
    fn serde_round_trips_as_number() {
        let json = serde_json::to_string(&Percentage::from_ratio(1, 2)).unwrap();
        assert_eq!(json, "50");
        assert!(serde_json::from_str::<Percentage>("150").is_err());
    }
}
