//! The alias store.
//!
//! Aliases map short memorable names to numeric Redmine IDs, so that
//! `rmine issues show deploy-bug` works anywhere an ID is accepted.
//! They live inside the config file and share its load/save cycle.

use super::{Config, ConfigError, Result};

/// Maximum length of an alias key.
const MAX_KEY_LEN: usize = 30;

/// Check whether a string is a valid alias key.
///
/// Keys must be 1-30 characters of ASCII letters, digits, `-` or `_`.
pub fn valid_alias_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Config {
    /// Add or replace an alias.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the key has an invalid format or
    /// the ID is not positive.
    pub fn set_alias(&mut self, key: &str, id: i64) -> Result<()> {
        if !valid_alias_key(key) {
            return Err(ConfigError::ValidationError(format!(
                "alias key '{}' must be 1-{} characters of letters, digits, '-' or '_'",
                key, MAX_KEY_LEN
            )));
        }

        if id <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "alias value must be a positive integer, got {}",
                id
            )));
        }

        self.aliases.insert(key.to_string(), id);
        Ok(())
    }

    /// Look up an alias by key.
    pub fn alias(&self, key: &str) -> Option<i64> {
        self.aliases.get(key).copied()
    }

    /// Remove an alias, returning the ID it pointed to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAlias` if no alias has that key.
    pub fn remove_alias(&mut self, key: &str) -> Result<i64> {
        self.aliases
            .remove(key)
            .ok_or_else(|| ConfigError::UnknownAlias(key.to_string()))
    }

    /// Resolve user input to a numeric ID.
    ///
    /// Accepts either a numeric literal or a previously defined alias.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAlias` if the input is neither.
    pub fn resolve_id(&self, input: &str) -> Result<i64> {
        if let Ok(id) = input.parse::<i64>() {
            return Ok(id);
        }

        self.alias(input)
            .ok_or_else(|| ConfigError::UnknownAlias(input.to_string()))
    }
}
