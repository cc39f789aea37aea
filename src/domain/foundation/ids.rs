//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a tenant (one configured assistant persona/business).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Creates a TenantId, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("tenant_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TenantId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

/// Key of one conversation session.
///
/// Transports hand us their own identifiers (chat ids, phone numbers,
/// browser session ids), so this is an opaque string rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a SessionKey, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Creates a new random SessionKey.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tenant_id {
        use super::*;

        #[test]
        fn accepts_non_empty_value() {
            let id = TenantId::new("timmy_vendas").unwrap();
            assert_eq!(id.as_str(), "timmy_vendas");
        }

        #[test]
        fn trims_surrounding_whitespace() {
            let id = TenantId::new("  clinic  ").unwrap();
            assert_eq!(id.to_string(), "clinic");
        }

        #[test]
        fn rejects_blank_value() {
            assert!(TenantId::new("   ").is_err());
            assert!("".parse::<TenantId>().is_err());
        }

        #[test]
        fn deserialization_validates() {
            let ok: TenantId = serde_json::from_str("\"acme\"").unwrap();
            assert_eq!(ok.as_str(), "acme");
            assert!(serde_json::from_str::<TenantId>("\"\"").is_err());
        }
    }

    mod session_key {
        use super::*;

        #[test]
        fn generate_creates_unique_keys() {
            assert_ne!(SessionKey::generate(), SessionKey::generate());
        }

        #[test]
        fn parses_transport_identifiers() {
            let key: SessionKey = "whatsapp:+5511987654321".parse().unwrap();
            assert_eq!(key.as_str(), "whatsapp:+5511987654321");
        }

        #[test]
        fn rejects_blank_value() {
            assert!(SessionKey::new("").is_err());
        }

        #[test]
        fn serializes_as_plain_string() {
            let key = SessionKey::new("abc").unwrap();
            assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
        }
    }
}
