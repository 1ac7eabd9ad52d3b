//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::TrailheadError;

/// Validate a request body, returning a TrailheadError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), TrailheadError> {
    body.validate().map_err(|e| TrailheadError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(&errors, &mut messages);
    // HashMap iteration order is unstable; keep messages deterministic
    messages.sort();
    messages.join("; ")
}

/// Walk nested structs and lists so errors inside request wrappers surface too.
fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => out.extend(errs.iter().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })),
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, out);
                }
            }
        }
    }
}
