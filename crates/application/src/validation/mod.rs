//! Validation Framework
//!
//! Request validation and the parsing steps that turn uploaded bytes into
//! scoreable tables.

mod submission;

pub use submission::*;

use leaderboard_domain::ValidationError;
use validator::Validate;

/// Extension to convert validator errors to the domain error type
pub trait ValidatorExt {
    /// Validate, reporting the first failing field in field-name order
    fn check(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> ValidatorExt for T {
    fn check(&self) -> Result<(), ValidationError> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };

        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let (field, field_errors) = match fields.into_iter().next() {
            Some(first) => first,
            None => {
                return Err(ValidationError::FieldValidation {
                    field: "request".to_string(),
                    message: errors.to_string(),
                })
            }
        };

        let message = field_errors
            .first()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string())
            })
            .unwrap_or_else(|| "invalid value".to_string());

        Err(ValidationError::FieldValidation {
            field: field.to_string(),
            message,
        })
    }
}
