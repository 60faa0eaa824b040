//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., positive integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded into the expected shape
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::MalformedBody { reason } => {
                write!(f, "invalid request body: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks a decoded request body before it reaches a repository
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// PostgreSQL `TEXT` cannot hold a NUL byte, even though JSON can carry one.
pub fn storable_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must not contain NUL bytes",
        });
    }
    Ok(())
}

/// Same as [`storable_text`] for optional patch fields.
pub fn storable_opt(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| storable_text(field, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        };
        assert_eq!(err.to_string(), "id: must be a positive integer");

        let err = ValidationError::MalformedBody {
            reason: "missing field `name`".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid request body: missing field `name`"
        );
    }

    #[test]
    fn nul_byte_is_not_storable() {
        let err = storable_text("title", "a\0b").unwrap_err();
        assert_eq!(err.to_string(), "title: must not contain NUL bytes");

        assert!(storable_text("title", "").is_ok());
        assert!(storable_opt("title", None).is_ok());
        assert!(storable_opt("title", Some("\0")).is_err());
    }
}
