//! Session identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of generated identifiers (hex characters).
pub const DEFAULT_ID_LEN: usize = 8;

/// Identifiers that stray files have been observed to carry and that
/// must never be treated as sessions.
const RESERVED: [&str; 3] = ["", "null", "[]"];

/// Opaque session identifier (Value Object)
///
/// Identifiers are used verbatim as file stems, so construction rejects
/// the reserved values and anything that could leave the storage
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if RESERVED.contains(&id.as_str())
            || id.contains(['/', '\\'])
            || id.contains("..")
            || id.chars().any(char::is_control)
        {
            return Err(DomainError::InvalidSessionId(id));
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier: the first 8 hex characters of a
    /// random v4 UUID.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(uuid[..DEFAULT_ID_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SessionId::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_short_hex() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), DEFAULT_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_differs() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_reserved_values_rejected() {
        for raw in ["", "null", "[]"] {
            assert_eq!(
                SessionId::new(raw),
                Err(DomainError::InvalidSessionId(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_path_escapes_rejected() {
        assert!(SessionId::new("../etc").is_err());
        assert!(SessionId::new("a/b").is_err());
        assert!(SessionId::new("a\\b").is_err());
    }

    #[test]
    fn test_ordinary_ids_accepted() {
        let id: SessionId = "abc123".parse().unwrap();
        assert_eq!(id.to_string(), "abc123");
        assert!(SessionId::new("guest").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<SessionId>(r#""null""#).is_err());
        let id: SessionId = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(id.as_str(), "abc123");
    }
}
