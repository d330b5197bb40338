//! Error types for lifespan.

use crate::field::Field;
use thiserror::Error;

/// A rejected input. `Display` is the annotation text shown next to the field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid birth date")]
    InvalidBirthDate,

    #[error("Invalid death date")]
    InvalidDeathDate,

    #[error("Birth date cannot be in the future")]
    BirthInFuture,

    #[error("Death date must be after birth date")]
    DeathNotAfterBirth,

    #[error("Life span must be at least 1 year")]
    LifespanTooShort,
}

impl ValidationError {
    /// The field the annotation is attached to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidBirthDate => Field::BirthDay,
            ValidationError::InvalidDeathDate => Field::DeathDay,
            ValidationError::BirthInFuture => Field::BirthYear,
            ValidationError::DeathNotAfterBirth | ValidationError::LifespanTooShort => {
                Field::DeathYear
            }
        }
    }
}

/// Unexpected failure while producing or presenting results.
#[derive(Error, Debug)]
pub enum LifespanError {
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LifespanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_field_annotations() {
        assert_eq!(ValidationError::InvalidBirthDate.to_string(), "Invalid birth date");
        assert_eq!(
            ValidationError::LifespanTooShort.to_string(),
            "Life span must be at least 1 year"
        );
        assert_eq!(ValidationError::BirthInFuture.field(), Field::BirthYear);
        assert_eq!(ValidationError::DeathNotAfterBirth.field(), Field::DeathYear);
        assert_eq!(ValidationError::InvalidDeathDate.field(), Field::DeathDay);
    }
}
