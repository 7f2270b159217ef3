use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{FormMode, SubmittedFields, User, UserDraft};
use crate::user_actor::UserError;
use crate::validation::{FormError, UserFormValidator};

/// A stored account together with the unmapped values of its submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUser {
    pub user: User,
    pub removed_assignments: Option<String>,
}

/// Client for the user directory.
///
/// Form submissions are validated here; only valid records are sent on.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    validator: UserFormValidator,
}

impl_client_methods!(UserClient, User, UserError, user);

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self {
            inner,
            validator: UserFormValidator::new(),
        }
    }

    /// Validates a submitted form and stores the result.
    ///
    /// The mode is fixed by the draft: a draft without an id creates a new
    /// account, one with an id updates that account.
    #[instrument(skip(self, draft, fields), fields(draft_id = ?draft.id))]
    pub async fn submit(&self, draft: &UserDraft, fields: &SubmittedFields) -> Result<SavedUser, UserError> {
        let mode = FormMode::for_draft(draft);
        debug!(%mode, field_count = fields.len(), "Validating submission");

        let submission = self.validator.submit(draft, mode, fields).map_err(|e| {
            warn!(%mode, error = %e, "Submission rejected");
            UserError::from(e)
        })?;

        let user = match mode {
            FormMode::Create => self.inner.create(submission.user).await?,
            FormMode::Edit => {
                let id = submission.user.id.clone().ok_or(FormError::EditWithoutId)?;
                self.inner.update(id, submission.user).await?
            }
        };

        info!(user_id = %user.id, login = %user.login, %mode, "User saved");
        Ok(SavedUser {
            user,
            removed_assignments: submission.removed_assignments,
        })
    }
}
