//! Storage rules for user accounts kept by the directory actor.

pub mod entity;
pub mod error;

pub use error::*;
