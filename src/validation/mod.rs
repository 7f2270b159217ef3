//! Validation of the user account form.
//!
//! Field constraints live in a static rule table ([`USER_FORM_RULES`]) that a
//! generic runner evaluates for the current [`FormMode`](crate::domain::FormMode).
//! The password confirmation check runs as a second phase once the per-field
//! rules have been applied.

pub mod constraints;
pub mod errors;
pub mod rules;
pub mod validator;

pub use constraints::*;
pub use errors::*;
pub use rules::*;
pub use validator::*;
