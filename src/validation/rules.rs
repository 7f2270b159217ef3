use once_cell::sync::Lazy;
use regex::Regex;

use super::{Constraint, FieldErrors};
use crate::domain::{Field, FormMode, SubmittedFields};

/// Characters allowed in a login.
pub static LOGIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.]+$").expect("login pattern is a valid regex"));

/// Modes in which a field is part of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Both,
    CreateOnly,
    EditOnly,
}

impl Scope {
    pub fn applies_to(self, mode: FormMode) -> bool {
        match self {
            Scope::Both => true,
            Scope::CreateOnly => mode == FormMode::Create,
            Scope::EditOnly => mode == FormMode::Edit,
        }
    }
}

/// How a raw submitted value is turned into the value the constraints see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalize {
    pub trim: bool,
    pub empty_is_absent: bool,
}

impl Normalize {
    /// Text inputs: surrounding whitespace is dropped.
    pub const TEXT: Normalize = Normalize { trim: true, empty_is_absent: false };
    /// Optional text inputs: trimmed, and an empty value counts as not submitted.
    pub const OPTIONAL_TEXT: Normalize = Normalize { trim: true, empty_is_absent: true };
    /// Password inputs: kept verbatim, empty counts as not submitted.
    pub const SECRET: Normalize = Normalize { trim: false, empty_is_absent: true };
    pub const RAW: Normalize = Normalize { trim: false, empty_is_absent: false };

    pub fn apply<'a>(&self, raw: Option<&'a str>) -> Option<&'a str> {
        let value = if self.trim { raw.map(str::trim) } else { raw };
        if self.empty_is_absent {
            value.filter(|value| !value.is_empty())
        } else {
            value
        }
    }
}

/// Constraints for one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub scope: Scope,
    pub normalize: Normalize,
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    /// The normalized value of this rule's field.
    pub fn value<'a>(&self, fields: &'a SubmittedFields) -> Option<&'a str> {
        self.normalize.apply(fields.get(self.field))
    }
}

/// The user account form, in declaration order.
pub static USER_FORM_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Login,
        scope: Scope::Both,
        normalize: Normalize::TEXT,
        constraints: &[
            Constraint::NotBlank,
            Constraint::Length { min: Some(3), max: Some(30) },
            Constraint::Pattern(&LOGIN_PATTERN),
        ],
    },
    FieldRule {
        field: Field::Name,
        scope: Scope::Both,
        normalize: Normalize::TEXT,
        constraints: &[Constraint::NotBlank, Constraint::Length { min: Some(3), max: Some(20) }],
    },
    FieldRule {
        field: Field::Email,
        scope: Scope::Both,
        normalize: Normalize::OPTIONAL_TEXT,
        constraints: &[Constraint::Email],
    },
    FieldRule {
        field: Field::Surname,
        scope: Scope::Both,
        normalize: Normalize::TEXT,
        constraints: &[Constraint::NotNull, Constraint::Length { min: None, max: Some(100) }],
    },
    FieldRule {
        field: Field::RemovedAssignments,
        scope: Scope::Both,
        normalize: Normalize::RAW,
        constraints: &[],
    },
    FieldRule {
        field: Field::Active,
        scope: Scope::EditOnly,
        normalize: Normalize::RAW,
        constraints: &[Constraint::Boolean],
    },
    FieldRule {
        field: Field::Password,
        scope: Scope::CreateOnly,
        normalize: Normalize::SECRET,
        constraints: &[Constraint::NotNull, Constraint::Length { min: Some(6), max: None }],
    },
    FieldRule {
        field: Field::PasswordConfirmation,
        scope: Scope::CreateOnly,
        normalize: Normalize::SECRET,
        constraints: &[Constraint::Length { min: Some(6), max: None }],
    },
];

/// Finds the rule for `field` in `rules`.
pub fn rule_for(rules: &[FieldRule], field: Field) -> Option<&FieldRule> {
    rules.iter().find(|rule| rule.field == field)
}

/// Runs every rule that applies to `mode` and collects all failures.
///
/// Rules never short-circuit: a field can carry several errors and every
/// field is checked.
pub fn run_rules(rules: &[FieldRule], mode: FormMode, fields: &SubmittedFields) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules.iter().filter(|rule| rule.scope.applies_to(mode)) {
        let value = rule.value(fields);
        for constraint in rule.constraints {
            if let Some(error) = constraint.check(rule.field, value) {
                errors.push(error);
            }
        }
    }
    errors
}
