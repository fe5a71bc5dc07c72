//! Validation utilities.

use crate::{FieldError, PressError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PressError` on failure.
    fn validate_request(&self) -> Result<(), PressError> {
        self.validate().map_err(validation_errors_to_press_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `PressError`.
#[must_use]
pub fn validation_errors_to_press_error(errors: ValidationErrors) -> PressError {
    let mut fields = field_errors(&errors);
    fields.sort_by(|a, b| a.field.cmp(&b.field));

    let message = fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    PressError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a slug-like identifier: lowercase ASCII letters, digits, `-` and `_`.
    ///
    /// Post and term slugs are stored URL-encoded, so `%` is also accepted.
    pub fn slug(value: &str) -> Result<(), ValidationError> {
        not_blank(value)?;
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '%'));
        if !valid {
            return Err(ValidationError::new("invalid_slug"));
        }
        Ok(())
    }

    /// Validates a table-name prefix: ASCII letters, digits and `_`, at most 32 characters.
    ///
    /// The prefix is spliced into SQL identifiers, so nothing else is allowed.
    /// An empty prefix is valid.
    pub fn table_prefix(value: &str) -> Result<(), ValidationError> {
        if value.len() > 32 {
            return Err(ValidationError::new("table_prefix_too_long"));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::new("invalid_table_prefix"));
        }
        Ok(())
    }

    /// Validates that every key in a meta key list is non-blank.
    pub fn meta_keys(keys: &[String]) -> Result<(), ValidationError> {
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::new("blank_meta_key"));
        }
        Ok(())
    }
}
