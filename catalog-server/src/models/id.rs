//! Entity identifier parsing
//!
//! Identifiers are database-assigned `SERIAL` values, so only positive
//! 32-bit integers can ever match a row.

use std::fmt;

use super::ValidationError;

/// Validated entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(i32);

impl EntityId {
    /// Parse an identifier from a path segment.
    ///
    /// # Example
    /// ```
    /// use catalog_server::models::EntityId;
    ///
    /// assert_eq!(EntityId::parse("42").unwrap().get(), 42);
    /// assert!(EntityId::parse("0").is_err());
    /// assert!(EntityId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            }),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<EntityId> for i32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
