//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("The value <{value}> is not a valid {kind}")]
    InvalidValue { kind: &'static str, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an error for a token outside an enumerated value set.
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidArgument,

    // Configuration errors
    DuplicateHandler,
    DeserializerNotSet,
    DeserializerAlreadySet,

    // Routing errors
    CommandNotRegistered,
    QueryNotRegistered,
    EventMappingNotFound,

    // Translation errors
    UnsupportedOperator,

    // Infrastructure errors
    SerializationError,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::DuplicateHandler => "DUPLICATE_HANDLER",
            ErrorCode::DeserializerNotSet => "DESERIALIZER_NOT_SET",
            ErrorCode::DeserializerAlreadySet => "DESERIALIZER_ALREADY_SET",
            ErrorCode::CommandNotRegistered => "COMMAND_NOT_REGISTERED",
            ErrorCode::QueryNotRegistered => "QUERY_NOT_REGISTERED",
            ErrorCode::EventMappingNotFound => "EVENT_MAPPING_NOT_FOUND",
            ErrorCode::UnsupportedOperator => "UNSUPPORTED_OPERATOR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a routing or configuration error that names the offending type.
    pub fn for_type(code: ErrorCode, type_name: &str, message: impl Into<String>) -> Self {
        Self::new(code, message).with_detail("type", type_name)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the offending type name recorded by [`DomainError::for_type`].
    pub fn type_name(&self) -> Option<&str> {
        self.details.get("type").map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::InvalidArgument, err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::new(ErrorCode::SerializationError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("field");
        assert_eq!(format!("{}", err), "Field 'field' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_value_displays_correctly() {
        let err = ValidationError::invalid_value("filter operator", "LIKE");
        assert_eq!(
            format!("{}", err),
            "The value <LIKE> is not a valid filter operator"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CommandNotRegistered, "No handler");
        assert_eq!(format!("{}", err), "[COMMAND_NOT_REGISTERED] No handler");
    }

    #[test]
    fn for_type_records_offending_type() {
        let err = DomainError::for_type(ErrorCode::QueryNotRegistered, "FindUser", "missing");
        assert_eq!(err.type_name(), Some("FindUser"));
    }

    #[test]
    fn validation_error_converts_to_invalid_argument() {
        let err: DomainError = ValidationError::empty_field("orderBy").into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("orderBy"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::UnsupportedOperator), "UNSUPPORTED_OPERATOR");
        assert_eq!(format!("{}", ErrorCode::DeserializerNotSet), "DESERIALIZER_NOT_SET");
    }
}
