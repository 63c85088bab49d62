//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),

    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    #[error("Query cannot be empty")]
    EmptyQuery,
}

impl DomainError {
    /// Check if this error was caused by user input rather than stored data
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::EmptyDisplayName | DomainError::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_session_id_display() {
        let error = DomainError::InvalidSessionId("null".to_string());
        assert_eq!(error.to_string(), "Invalid session id: \"null\"");
    }

    #[test]
    fn test_is_input_error_check() {
        assert!(DomainError::EmptyQuery.is_input_error());
        assert!(DomainError::EmptyDisplayName.is_input_error());
        assert!(!DomainError::InvalidSessionId("[]".to_string()).is_input_error());
    }
}
