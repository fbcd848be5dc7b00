use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicyError {
    #[error("failed to parse policy document: {0}")]
    ParseError(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::ParseError(err.to_string())
    }
}

impl From<strum::ParseError> for PolicyError {
    fn from(err: strum::ParseError) -> Self {
        PolicyError::InvalidFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let policy_err: PolicyError = err.into();
        assert!(matches!(policy_err, PolicyError::ParseError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = PolicyError::InvalidFormat("unknown category 'maybe'".to_string());
        assert_eq!(err.to_string(), "Invalid format: unknown category 'maybe'");
    }

    #[test]
    fn test_error_serialization() {
        let err = PolicyError::ParseError("eof".to_string());
        let serialized = serde_json::to_value(&err).unwrap();
        let deserialized: PolicyError = serde_json::from_value(serialized).unwrap();
        assert_eq!(err, deserialized);
    }
}
