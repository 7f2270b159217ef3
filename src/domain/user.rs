use serde::Serialize;

/// Represents a persisted user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub active: bool,
}

/// In-memory representation of a user record being created or edited.
///
/// A draft built with [`UserDraft::new`] has no `id` and puts the form in
/// create mode. A draft built from an existing [`User`] carries its `id` and
/// `active` flag and puts the form in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<String>,
    pub login: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub active: Option<bool>,
}

impl UserDraft {
    /// Creates an empty draft for a new account.
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            login: user.login.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            active: Some(user.active),
        }
    }
}

/// A user record that passed every form rule.
///
/// Never carries the password fields; those are checked and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidUser {
    pub id: Option<String>,
    pub login: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub active: bool,
}

impl ValidUser {
    /// Builds the persisted record under the given id.
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            login: self.login,
            name: self.name,
            surname: self.surname,
            email: self.email,
            active: self.active,
        }
    }
}

/// Outcome of a successful form submission.
///
/// `removed_assignments` is an unmapped passthrough value: it is handed back
/// to the caller untouched and never copied onto the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub user: ValidUser,
    pub removed_assignments: Option<String>,
}
