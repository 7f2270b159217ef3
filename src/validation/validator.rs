use tracing::debug;

use super::{parse_checkbox, rule_for, run_rules, FieldError, FieldErrors, FieldRule, FormError, ValidationErrorKind, USER_FORM_RULES};
use crate::domain::{Field, FormMode, FormSubmission, SubmittedFields, UserDraft, ValidUser};

/// Validates submissions of the user account form.
///
/// Holds no state between calls: the same input always gives the same
/// result, and one validator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct UserFormValidator {
    rules: &'static [FieldRule],
}

impl Default for UserFormValidator {
    fn default() -> Self {
        Self { rules: USER_FORM_RULES }
    }
}

impl UserFormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `fields` against the form for `draft` in `mode`.
    ///
    /// Returns every field error at once. Password fields are only looked at
    /// in create mode and the active toggle only in edit mode.
    ///
    /// # Errors
    /// [`FormError::Invalid`] when any rule fails. The other variants mean
    /// `mode` does not match the draft.
    pub fn validate(
        &self,
        draft: &UserDraft,
        mode: FormMode,
        fields: &SubmittedFields,
    ) -> Result<ValidUser, FormError> {
        self.submit(draft, mode, fields).map(|submission| submission.user)
    }

    /// Like [`validate`](Self::validate), but also hands back the unmapped
    /// passthrough values.
    pub fn submit(
        &self,
        draft: &UserDraft,
        mode: FormMode,
        fields: &SubmittedFields,
    ) -> Result<FormSubmission, FormError> {
        check_preconditions(draft, mode)?;

        let mut errors = run_rules(self.rules, mode, fields);
        if mode == FormMode::Create {
            self.check_password_confirmation(fields, &mut errors);
        }

        if !errors.is_empty() {
            debug!(%mode, error_count = errors.len(), "Form validation failed");
            return Err(FormError::Invalid(errors));
        }

        debug!(%mode, "Form validation passed");
        Ok(FormSubmission {
            user: self.build_user(draft, mode, fields),
            removed_assignments: self.value(Field::RemovedAssignments, fields).map(str::to_string),
        })
    }

    /// Second phase: the confirmation must equal the password exactly.
    ///
    /// Skipped when the password itself is missing, since that is already
    /// reported on the password field.
    fn check_password_confirmation(&self, fields: &SubmittedFields, errors: &mut FieldErrors) {
        let Some(password) = self.value(Field::Password, fields) else {
            return;
        };
        if self.value(Field::PasswordConfirmation, fields) != Some(password) {
            errors.push(FieldError::new(
                Field::PasswordConfirmation,
                ValidationErrorKind::Mismatch,
                "passwords do not match",
            ));
        }
    }

    fn build_user(&self, draft: &UserDraft, mode: FormMode, fields: &SubmittedFields) -> ValidUser {
        let text = |field: Field| self.value(field, fields).unwrap_or_default().to_string();
        let active = match mode {
            FormMode::Create => true,
            FormMode::Edit => parse_checkbox(self.value(Field::Active, fields)).unwrap_or(false),
        };

        ValidUser {
            id: draft.id.clone(),
            login: text(Field::Login),
            name: text(Field::Name),
            surname: text(Field::Surname),
            email: self.value(Field::Email, fields).map(str::to_string),
            active,
        }
    }

    fn value<'a>(&self, field: Field, fields: &'a SubmittedFields) -> Option<&'a str> {
        rule_for(self.rules, field).and_then(|rule| rule.value(fields))
    }
}

fn check_preconditions(draft: &UserDraft, mode: FormMode) -> Result<(), FormError> {
    match (mode, &draft.id) {
        (FormMode::Edit, None) => Err(FormError::EditWithoutId),
        (FormMode::Create, Some(id)) => Err(FormError::CreateWithId(id.clone())),
        (FormMode::Edit, Some(_)) if draft.active.is_none() => Err(FormError::MissingActiveState),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn create_fields() -> SubmittedFields {
        SubmittedFields::new()
            .with(Field::Login, "alice.smith")
            .with(Field::Name, "Alice")
            .with(Field::Surname, "Smith")
            .with(Field::Email, "alice@example.com")
            .with(Field::Password, "secret1")
            .with(Field::PasswordConfirmation, "secret1")
    }

    fn edit_draft() -> UserDraft {
        UserDraft::from(&User {
            id: "user_1".to_string(),
            login: "alice.smith".to_string(),
            name: "Alice".to_string(),
            surname: "Smith".to_string(),
            email: None,
            active: true,
        })
    }

    fn edit_fields() -> SubmittedFields {
        SubmittedFields::new()
            .with(Field::Login, "alice.smith")
            .with(Field::Name, "Alice")
            .with(Field::Surname, "Smith")
            .with(Field::Active, "1")
    }

    fn invalid(result: Result<ValidUser, FormError>) -> FieldErrors {
        match result {
            Err(FormError::Invalid(errors)) => {
                assert!(!errors.is_empty());
                errors
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_create_success() {
        let validator = UserFormValidator::new();
        let user = validator
            .validate(&UserDraft::new(), FormMode::Create, &create_fields())
            .unwrap();

        assert_eq!(user.id, None);
        assert_eq!(user.login, "alice.smith");
        assert_eq!(user.surname, "Smith");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert!(user.active);
    }

    #[test]
    fn test_short_login() {
        let fields = create_fields().with(Field::Login, "ab");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::Login), vec![ValidationErrorKind::TooShort]);
    }

    #[test]
    fn test_login_with_underscore() {
        let fields = create_fields().with(Field::Login, "john_doe");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::Login), vec![ValidationErrorKind::PatternMismatch]);
    }

    #[test]
    fn test_blank_login_reports_only_blank() {
        let fields = create_fields().with(Field::Login, "   ");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::Login), vec![ValidationErrorKind::Blank]);
    }

    #[test]
    fn test_password_mismatch_lands_on_confirmation() {
        let fields = create_fields()
            .with(Field::Password, "secret1")
            .with(Field::PasswordConfirmation, "secret2");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::PasswordConfirmation), vec![ValidationErrorKind::Mismatch]);
        assert_eq!(errors.get(Field::PasswordConfirmation)[0].message, "passwords do not match");
        assert!(!errors.contains_field(Field::Password));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_password_comparison_is_case_sensitive_and_untrimmed() {
        let validator = UserFormValidator::new();

        let fields = create_fields().with(Field::PasswordConfirmation, "SECRET1");
        let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
        assert!(errors.has(Field::PasswordConfirmation, ValidationErrorKind::Mismatch));

        let fields = create_fields()
            .with(Field::Password, "secret1 ")
            .with(Field::PasswordConfirmation, "secret1");
        let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
        assert!(errors.has(Field::PasswordConfirmation, ValidationErrorKind::Mismatch));
    }

    #[test]
    fn test_missing_confirmation_is_a_mismatch() {
        let mut fields = SubmittedFields::new();
        for (field, value) in [
            (Field::Login, "alice"),
            (Field::Name, "Alice"),
            (Field::Surname, ""),
            (Field::Password, "secret1"),
        ] {
            fields.insert(field, value);
        }
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::PasswordConfirmation), vec![ValidationErrorKind::Mismatch]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_passwords() {
        let fields = create_fields()
            .with(Field::Password, "abc")
            .with(Field::PasswordConfirmation, "abc");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::Password), vec![ValidationErrorKind::TooShort]);
        assert_eq!(errors.kinds(Field::PasswordConfirmation), vec![ValidationErrorKind::TooShort]);
    }

    #[test]
    fn test_missing_password_skips_mismatch() {
        let fields = create_fields()
            .with(Field::Password, "")
            .with(Field::PasswordConfirmation, "secret1");
        let errors = invalid(UserFormValidator::new().validate(&UserDraft::new(), FormMode::Create, &fields));

        assert_eq!(errors.kinds(Field::Password), vec![ValidationErrorKind::Blank]);
        assert!(!errors.contains_field(Field::PasswordConfirmation));
    }

    #[test]
    fn test_edit_ignores_password_fields() {
        let fields = edit_fields()
            .with(Field::Password, "x")
            .with(Field::PasswordConfirmation, "y");
        let user = UserFormValidator::new()
            .validate(&edit_draft(), FormMode::Edit, &fields)
            .unwrap();

        assert_eq!(user.id.as_deref(), Some("user_1"));
        assert!(user.active);
    }

    #[test]
    fn test_edit_active_toggle() {
        let validator = UserFormValidator::new();

        let mut fields = SubmittedFields::new();
        fields.insert(Field::Login, "alice.smith");
        fields.insert(Field::Name, "Alice");
        fields.insert(Field::Surname, "Smith");
        let user = validator.validate(&edit_draft(), FormMode::Edit, &fields).unwrap();
        assert!(!user.active);

        let fields = edit_fields().with(Field::Active, "perhaps");
        let errors = invalid(validator.validate(&edit_draft(), FormMode::Edit, &fields));
        assert_eq!(errors.kinds(Field::Active), vec![ValidationErrorKind::InvalidFormat]);
    }

    #[test]
    fn test_email_handling() {
        let validator = UserFormValidator::new();

        let fields = create_fields().with(Field::Email, "");
        let user = validator.validate(&UserDraft::new(), FormMode::Create, &fields).unwrap();
        assert_eq!(user.email, None);

        let fields = create_fields().with(Field::Email, "not-an-email");
        let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
        assert_eq!(errors.kinds(Field::Email), vec![ValidationErrorKind::InvalidFormat]);
    }

    #[test]
    fn test_email_domain_needs_a_dot() {
        let validator = UserFormValidator::new();

        for email in ["alice@localhost", "a@b"] {
            let fields = create_fields().with(Field::Email, email);
            let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
            assert_eq!(errors.kinds(Field::Email), vec![ValidationErrorKind::InvalidFormat], "{email}");
        }
    }

    #[test]
    fn test_login_and_name_upper_bounds() {
        let validator = UserFormValidator::new();

        let fields = create_fields()
            .with(Field::Login, "a".repeat(30))
            .with(Field::Name, "n".repeat(20));
        let user = validator.validate(&UserDraft::new(), FormMode::Create, &fields).unwrap();
        assert_eq!(user.login.len(), 30);
        assert_eq!(user.name.len(), 20);

        let fields = create_fields()
            .with(Field::Login, "a".repeat(31))
            .with(Field::Name, "n".repeat(21));
        let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
        assert_eq!(errors.kinds(Field::Login), vec![ValidationErrorKind::TooLong]);
        assert_eq!(errors.kinds(Field::Name), vec![ValidationErrorKind::TooLong]);
    }

    #[test]
    fn test_surname_may_be_empty_but_not_absent() {
        let validator = UserFormValidator::new();

        let fields = create_fields().with(Field::Surname, "");
        assert_eq!(validator.validate(&UserDraft::new(), FormMode::Create, &fields).unwrap().surname, "");

        let fields = create_fields().with(Field::Surname, "x".repeat(101));
        let errors = invalid(validator.validate(&UserDraft::new(), FormMode::Create, &fields));
        assert_eq!(errors.kinds(Field::Surname), vec![ValidationErrorKind::TooLong]);
    }

    #[test]
    fn test_empty_submission_reports_every_required_field() {
        let errors = invalid(UserFormValidator::new().validate(
            &UserDraft::new(),
            FormMode::Create,
            &SubmittedFields::new(),
        ));

        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Login, Field::Name, Field::Surname, Field::Password]);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let fields = create_fields()
            .with(Field::Login, "  alice  ")
            .with(Field::Email, " alice@example.com ");
        let user = UserFormValidator::new()
            .validate(&UserDraft::new(), FormMode::Create, &fields)
            .unwrap();

        assert_eq!(user.login, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_removed_assignments_pass_through() {
        let fields = create_fields().with(Field::RemovedAssignments, " 3,7 ");
        let submission = UserFormValidator::new()
            .submit(&UserDraft::new(), FormMode::Create, &fields)
            .unwrap();

        assert_eq!(submission.removed_assignments.as_deref(), Some(" 3,7 "));
    }

    #[test]
    fn test_same_input_same_result() {
        let validator = UserFormValidator::new();
        let fields = create_fields()
            .with(Field::Login, "x")
            .with(Field::PasswordConfirmation, "nope");

        let first = validator.validate(&UserDraft::new(), FormMode::Create, &fields);
        let second = validator.validate(&UserDraft::new(), FormMode::Create, &fields);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_must_match_draft() {
        let validator = UserFormValidator::new();

        assert_eq!(
            validator.validate(&UserDraft::new(), FormMode::Edit, &edit_fields()),
            Err(FormError::EditWithoutId)
        );
        assert_eq!(
            validator.validate(&edit_draft(), FormMode::Create, &create_fields()),
            Err(FormError::CreateWithId("user_1".to_string()))
        );

        let mut draft = edit_draft();
        draft.active = None;
        assert_eq!(
            validator.validate(&draft, FormMode::Edit, &edit_fields()),
            Err(FormError::MissingActiveState)
        );
    }
}
