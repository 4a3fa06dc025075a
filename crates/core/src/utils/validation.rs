use uuid::Uuid;

use crate::constants::{MAX_NOTE_LENGTH, MAX_TITLE_LENGTH};
use crate::errors::{Error, Result, ValidationError};

/// Unwraps a required input field.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::Validation(ValidationError::MissingField(field.to_string())))
}

/// Checks that a path identifier is a well-formed UUID.
pub fn validate_id(field: &str, value: &str) -> Result<()> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| Error::invalid_field(field, format!("'{value}' is not a valid identifier")))
}

/// Validates a non-blank title of bounded length.
pub fn validate_title(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::invalid_field(field, "must not be empty"));
    }
    if value.chars().count() > MAX_TITLE_LENGTH {
        return Err(Error::invalid_field(
            field,
            format!("must be at most {MAX_TITLE_LENGTH} characters"),
        ));
    }
    Ok(value)
}

/// Validates an optional free-text note; blank notes are stored as absent.
pub fn validate_note(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(note) if note.chars().count() > MAX_NOTE_LENGTH => Err(Error::invalid_field(
            field,
            format!("must be at most {MAX_NOTE_LENGTH} characters"),
        )),
        Some(note) if note.trim().is_empty() => Ok(None),
        other => Ok(other),
    }
}
