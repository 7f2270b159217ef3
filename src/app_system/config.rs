use std::env;
use std::str::FromStr;

use tracing::warn;

pub const BUFFER_SIZE_VAR: &str = "USER_FORMS_BUFFER_SIZE";
pub const ID_PREFIX_VAR: &str = "USER_FORMS_ID_PREFIX";

/// Settings for starting a [`UserSystem`](super::UserSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of the directory actor's request channel.
    pub buffer_size: usize,
    /// Prefix of generated user ids, as in `user_1`.
    pub id_prefix: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            id_prefix: "user".to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads overrides from the environment, keeping defaults for anything
    /// missing or unusable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let buffer_size = parse_or(lookup(BUFFER_SIZE_VAR), BUFFER_SIZE_VAR, defaults.buffer_size)
            .max(1);
        let id_prefix = match lookup(ID_PREFIX_VAR) {
            Some(prefix) if !prefix.trim().is_empty() => prefix.trim().to_string(),
            Some(_) => {
                warn!(var = ID_PREFIX_VAR, "Empty value, using default");
                defaults.id_prefix
            }
            None => defaults.id_prefix,
        };

        Self { buffer_size, id_prefix }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, var: &str, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var, value = %raw, "Unparsable value, using default");
            default
        }),
        None => default,
    }
}
