use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use super::{FieldError, ValidationErrorKind};
use crate::domain::Field;

/// Loose address shape: something, `@`, then a domain with at least one dot.
pub static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@\S+\.\S+$").expect("email pattern is a valid regex"));

/// A single check applied to a field's normalized value.
///
/// `None` means the field is absent. Apart from `NotBlank` and `NotNull`,
/// constraints accept absent and empty values; presence is a separate rule.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Rejects absent and empty values.
    NotBlank,
    /// Rejects absent values only.
    NotNull,
    /// Bounds the length in characters.
    Length { min: Option<usize>, max: Option<usize> },
    /// Requires a full match of the pattern.
    Pattern(&'static Lazy<Regex>),
    Email,
    /// Accepts checkbox values, see [`parse_checkbox`].
    Boolean,
}

impl Constraint {
    /// Returns the error for `value`, if it violates this constraint.
    pub fn check(&self, field: Field, value: Option<&str>) -> Option<FieldError> {
        match *self {
            Constraint::NotBlank => match value {
                None | Some("") => Some(blank(field)),
                Some(_) => None,
            },
            Constraint::NotNull => value.is_none().then(|| blank(field)),
            Constraint::Length { min, max } => {
                let len = present(value)?.chars().count();
                match (min, max) {
                    (Some(min), _) if len < min => Some(FieldError::new(
                        field,
                        ValidationErrorKind::TooShort,
                        format!("This value is too short. It should have {min} characters or more."),
                    )),
                    (_, Some(max)) if len > max => Some(FieldError::new(
                        field,
                        ValidationErrorKind::TooLong,
                        format!("This value is too long. It should have {max} characters or less."),
                    )),
                    _ => None,
                }
            }
            Constraint::Pattern(pattern) => {
                let value = present(value)?;
                (!pattern.is_match(value)).then(|| {
                    FieldError::new(field, ValidationErrorKind::PatternMismatch, "This value is not valid.")
                })
            }
            Constraint::Email => {
                let value = present(value)?;
                let valid = value.to_string().validate_email() && EMAIL_SHAPE.is_match(value);
                (!valid).then(|| {
                    FieldError::new(
                        field,
                        ValidationErrorKind::InvalidFormat,
                        "This value is not a valid email address.",
                    )
                })
            }
            Constraint::Boolean => parse_checkbox(value).is_none().then(|| {
                FieldError::new(field, ValidationErrorKind::InvalidFormat, "This value should be a boolean.")
            }),
        }
    }
}

/// Reads a checkbox value.
///
/// An absent value is an unchecked box. Returns `None` for values that are
/// not recognisable as a boolean.
pub fn parse_checkbox(value: Option<&str>) -> Option<bool> {
    let Some(value) = value else {
        return Some(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "" | "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn blank(field: Field) -> FieldError {
    FieldError::new(field, ValidationErrorKind::Blank, "This value should not be blank.")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
