//! Typed handles that talk to the actors.

#[macro_use]
mod macros;
pub mod user_client;

pub use user_client::*;
