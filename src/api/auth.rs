//! Authentication handling for the Redmine API.
//!
//! Regular requests authenticate with an API key sent in the
//! `X-Redmine-API-Key` header. Basic Auth (login + password) is used
//! exactly once, during `rmine login`, to fetch the account's API key.
//! The key itself is stored in the OS keyring, never in the config file.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name for rmine API keys.
const KEYRING_SERVICE: &str = "rmine";

/// API key credentials for Redmine.
#[derive(Clone)]
pub struct Auth {
    /// The API key.
    api_key: String,
}

impl Auth {
    /// Create new credentials from an API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }

    /// Create credentials for a login by reading the key from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be retrieved from the keyring.
    pub fn from_keyring(login: &str) -> Result<Self> {
        let key = get_key(login)?;
        Ok(Self::new(&key))
    }

    /// Get the `X-Redmine-API-Key` header value.
    pub fn header_value(&self) -> &str {
        &self.api_key
    }
}

// Manual Debug so the key never leaks into logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth").field("api_key", &"<redacted>").finish()
    }
}

/// Build a Basic Auth header value from login and password.
///
/// Only used by the `login` command to fetch the account's API key.
pub fn basic_auth_header(login: &str, password: &str) -> String {
    let credentials = format!("{}:{}", login, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

/// Store an API key in the OS keyring.
///
/// # Arguments
///
/// * `login` - The Redmine login name used as the keyring username
/// * `key` - The API key to store
///
/// # Errors
///
/// Returns an error if the key cannot be stored in the keyring.
pub fn store_key(login: &str, key: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, login)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(key)
        .map_err(|e| ApiError::Keyring(format!("failed to store API key: {}", e)))?;

    Ok(())
}

/// Retrieve an API key from the OS keyring.
///
/// # Errors
///
/// Returns an error if the key cannot be retrieved from the keyring.
pub fn get_key(login: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, login)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve API key: {}", e)))
}

/// Delete an API key from the OS keyring.
///
/// # Errors
///
/// Returns an error if the key cannot be deleted from the keyring.
pub fn delete_key(login: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, login)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete API key: {}", e)))?;

    Ok(())
}

/// Check if an API key exists in the OS keyring for a login.
pub fn has_key(login: &str) -> bool {
    get_key(login).is_ok()
}
