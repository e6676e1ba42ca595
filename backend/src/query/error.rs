//! Validation errors raised before anything reaches the store.

/// Result type for normalization and create-payload validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed or out-of-range caller input.
///
/// Every variant names the field (or fields) that failed so the HTTP layer
/// can report it back without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A single field failed its type or range check.
    #[error("{message}")]
    InvalidField { field: String, message: String },

    /// One or more required create fields were absent or empty.
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field names, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::InvalidField { field, .. } => vec![field.as_str()],
            Self::MissingFields { fields } => fields.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display_is_message() {
        let err = ValidationError::invalid("rating", "rating out of range");
        assert_eq!(err.to_string(), "rating out of range");
        assert_eq!(err.fields(), vec!["rating"]);
    }

    #[test]
    fn test_missing_fields_display_lists_all() {
        let err = ValidationError::MissingFields {
            fields: vec!["name".to_string(), "gender".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required fields: name, gender");
        assert_eq!(err.fields(), vec!["name", "gender"]);
    }
}
