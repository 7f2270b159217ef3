use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::domain::Field;

/// Kind of rule a submitted value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Blank,
    TooShort,
    TooLong,
    PatternMismatch,
    InvalidFormat,
    Mismatch,
}

/// A validation failure scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field-scoped error produced by one validation pass.
///
/// Fields iterate in form declaration order; errors within a field keep the
/// order their rules ran in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<FieldError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.entry(error.field).or_default().push(error);
    }

    /// Errors attached to `field`, empty when it passed.
    pub fn get(&self, field: Field) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds attached to `field`, in rule order.
    pub fn kinds(&self, field: Field) -> Vec<ValidationErrorKind> {
        self.get(field).iter().map(|error| error.kind).collect()
    }

    pub fn has(&self, field: Field, kind: ValidationErrorKind) -> bool {
        self.get(field).iter().any(|error| error.kind == kind)
    }

    pub fn contains_field(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Fields with at least one error.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.values().flatten()
    }

    /// Total number of errors across all fields.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field name to messages, for the presentation layer.
    pub fn to_messages(&self) -> Vec<(&'static str, Vec<String>)> {
        self.errors
            .iter()
            .map(|(field, errors)| {
                let messages = errors.iter().map(|error| error.message.clone()).collect();
                (field.as_str(), messages)
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

// Rendered as an object keyed by field name, keeping declaration order.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let messages = self.to_messages();
        let mut map = serializer.serialize_map(Some(messages.len()))?;
        for (field, messages) in &messages {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Failure of [`UserFormValidator::validate`](super::UserFormValidator::validate).
///
/// `Invalid` carries user-data errors and is always non-empty. The other
/// variants report misuse of the form by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form is invalid: {0}")]
    Invalid(FieldErrors),
    #[error("edit mode requested for a draft without an id")]
    EditWithoutId,
    #[error("create mode requested for a draft that already has id {0}")]
    CreateWithId(String),
    #[error("edit mode requires the draft's active state")]
    MissingActiveState,
}

impl FormError {
    /// True for caller misuse rather than bad user input.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, FormError::Invalid(_))
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(field: Field, kind: ValidationErrorKind, message: &str) -> FieldError {
        FieldError::new(field, kind, message)
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let mut errors = FieldErrors::new();
        errors.push(error(Field::PasswordConfirmation, ValidationErrorKind::Mismatch, "passwords do not match"));
        errors.push(error(Field::Login, ValidationErrorKind::TooShort, "short"));
        errors.push(error(Field::Login, ValidationErrorKind::PatternMismatch, "pattern"));

        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Login, Field::PasswordConfirmation]);
        assert_eq!(
            errors.kinds(Field::Login),
            vec![ValidationErrorKind::TooShort, ValidationErrorKind::PatternMismatch]
        );
        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::Name).is_empty());
    }

    #[test]
    fn test_serializes_as_message_map() {
        let mut errors = FieldErrors::new();
        errors.push(error(Field::Surname, ValidationErrorKind::TooLong, "too long"));
        errors.push(error(Field::Login, ValidationErrorKind::Blank, "blank"));

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"login":["blank"],"surname":["too long"]}"#);
    }

    #[test]
    fn test_precondition_errors_are_distinct() {
        assert!(FormError::EditWithoutId.is_precondition());
        assert!(FormError::MissingActiveState.is_precondition());
        assert!(!FormError::Invalid(FieldErrors::new()).is_precondition());
        assert!(FormError::EditWithoutId.field_errors().is_none());
    }
}
