use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UserDraft;

/// Which optional field group the form carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// New account: password and confirmation fields apply.
    Create,
    /// Existing account: the active toggle applies.
    Edit,
}

impl FormMode {
    /// Mode implied by the draft's identity at form-construction time.
    pub fn for_draft(draft: &UserDraft) -> Self {
        if draft.id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMode::Create => f.write_str("create"),
            FormMode::Edit => f.write_str("edit"),
        }
    }
}

/// Form fields in declaration order.
///
/// The derived ordering is the order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "login")]
    Login,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "surname")]
    Surname,
    #[serde(rename = "removedAssignments")]
    RemovedAssignments,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "passwordConfirmation")]
    PasswordConfirmation,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Login,
        Field::Name,
        Field::Email,
        Field::Surname,
        Field::RemovedAssignments,
        Field::Active,
        Field::Password,
        Field::PasswordConfirmation,
    ];

    /// Name used in submitted data and rendered error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Login => "login",
            Field::Name => "name",
            Field::Email => "email",
            Field::Surname => "surname",
            Field::RemovedAssignments => "removedAssignments",
            Field::Active => "active",
            Field::Password => "password",
            Field::PasswordConfirmation => "passwordConfirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw values posted by the form, keyed by field name.
///
/// Names that do not belong to the form are dropped on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedFields {
    values: HashMap<Field, String>,
}

impl SubmittedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning `self` for chaining.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Raw value as submitted, or `None` when the field was not posted.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SubmittedFields
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = SubmittedFields::new();
        for (name, value) in iter {
            if let Ok(field) = name.as_ref().parse::<Field>() {
                fields.insert(field, value);
            }
        }
        fields
    }
}

impl From<HashMap<String, String>> for SubmittedFields {
    fn from(raw: HashMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}
