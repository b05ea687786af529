//! API key lookup: environment first, then the OS keyring.

use crate::error::ChatError;

/// Keyring service name.
pub const SERVICE: &str = "studybuddy";

/// Keyring entry holding the chat API key.
pub const API_KEY_ENTRY: &str = "openai_api_key";

/// Environment variables checked, in order, before the keyring.
pub const API_KEY_ENV_VARS: [&str; 2] = ["STUDYBUDDY_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Where the active API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    Keyring,
}

pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    entry.set_password(value)
}

/// Deleting a missing entry is not an error.
pub fn delete(key: &str) -> Result<(), keyring::Error> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e),
    }
}

fn env_key() -> Option<(&'static str, String)> {
    API_KEY_ENV_VARS.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| (*name, v))
    })
}

/// Resolve the chat API key.
///
/// # Errors
/// `ChatError::MissingApiKey` when neither source has one, or the keyring
/// error if the credential store itself fails.
pub fn api_key() -> Result<String, ChatError> {
    if let Some((_, key)) = env_key() {
        return Ok(key);
    }
    get(API_KEY_ENTRY)?.ok_or(ChatError::MissingApiKey)
}

/// Which source would supply the key, without returning it.
pub fn api_key_source() -> Result<Option<KeySource>, ChatError> {
    if let Some((name, _)) = env_key() {
        return Ok(Some(KeySource::Env(name)));
    }
    Ok(get(API_KEY_ENTRY)?.map(|_| KeySource::Keyring))
}
