use crate::actor_framework::Entity;
use crate::domain::{User, ValidUser};

impl Entity for User {
    type Id = String;
    type CreatePayload = ValidUser;
    type Patch = ValidUser;

    fn id(&self) -> &String { &self.id }

    /// Builds the stored account under the id assigned by the directory.
    ///
    /// Any id on the payload is ignored.
    fn from_create(id: String, payload: ValidUser) -> Result<Self, String> {
        Ok(payload.into_user(id))
    }

    /// Logins are unique, compared case-sensitively.
    fn unique_key(&self) -> Option<&str> {
        Some(&self.login)
    }

    fn payload_key(payload: &ValidUser) -> Option<&str> {
        Some(&payload.login)
    }

    /// Replaces every form-managed field. The stored id is kept.
    fn on_update(&mut self, patch: ValidUser) -> Result<(), String> {
        if let Some(id) = &patch.id {
            if *id != self.id {
                return Err(format!("Patch for {} applied to {}", id, self.id));
            }
        }
        self.login = patch.login;
        self.name = patch.name;
        self.surname = patch.surname;
        self.email = patch.email;
        self.active = patch.active;
        Ok(())
    }
}
