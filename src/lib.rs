//! # user-forms
//!
//! Validation for the user account form, plus a small in-memory user
//! directory that stores what passes.
//!
//! - **Validation** - [`validation::UserFormValidator`] checks a submission
//!   against the form for a [`domain::FormMode`] and returns every field
//!   error in one pass.
//! - **Directory** - a [`actor_framework::ResourceActor`] owns the stored
//!   accounts; [`clients::UserClient`] validates, then creates or updates.
//! - **System** - [`app_system::UserSystem`] starts and stops the actors.
//!
//! ```no_run
//! use user_forms::app_system::{SystemConfig, UserSystem};
//! use user_forms::domain::{SubmittedFields, UserDraft};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = UserSystem::new(SystemConfig::default());
//! let fields: SubmittedFields = [
//!     ("login", "alice"),
//!     ("name", "Alice"),
//!     ("surname", "Smith"),
//!     ("password", "secret1"),
//!     ("passwordConfirmation", "secret1"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let saved = system.user_client.submit(&UserDraft::new(), &fields).await?;
//! println!("created {}", saved.user.id);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod user_actor;
pub mod validation;

#[cfg(test)]
mod mock_framework;
