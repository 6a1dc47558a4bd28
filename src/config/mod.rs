//! Translation API configuration
//!
//! Builds the explicit configuration object handed to the translation
//! client. Nothing here is process-global: the endpoint and host come from
//! settings, the key from the environment or the OS keyring.

use keyring::Entry;

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::ApiSettings;

const KEYRING_SERVICE: &str = "translator-widget";
const KEYRING_ACCOUNT: &str = "rapidapi_key";

pub const API_KEY_ENV: &str = "RAPID_API_KEY";
pub const API_HOST_ENV: &str = "RAPID_API_HOST";

/// Static credential pair sent with every request
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub host: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub api_version: String,
    pub profanity_action: String,
    pub text_type: String,
    pub credentials: ApiCredentials,
}

impl TranslatorConfig {
    pub fn new(api: &ApiSettings, credentials: ApiCredentials) -> Self {
        Self {
            endpoint: api.endpoint.clone(),
            api_version: api.api_version.clone(),
            profanity_action: api.profanity_action.clone(),
            text_type: api.text_type.clone(),
            credentials,
        }
    }

    /// Resolve credentials from the environment / keyring and combine them
    /// with the persisted API settings.
    pub fn resolve(api: &ApiSettings) -> AppResult<Self> {
        let key = resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
        let host = std::env::var(API_HOST_ENV)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| api.host.clone());

        Ok(Self::new(api, ApiCredentials { key, host }))
    }
}

fn resolve_api_key(env_key: Option<String>) -> AppResult<String> {
    if let Some(key) = env_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        log::debug!("[Config] Using API key from {}", API_KEY_ENV);
        return Ok(key);
    }

    let entry = Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)?;
    match entry.get_password() {
        Ok(key) if !key.trim().is_empty() => {
            log::debug!("[Config] Using API key from keyring");
            Ok(key)
        }
        Ok(_) | Err(keyring::Error::NoEntry) => Err(AppError::Config(format!(
            "Missing API key: set {} or store it in the keyring ({}/{})",
            API_KEY_ENV, KEYRING_SERVICE, KEYRING_ACCOUNT
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Persist an API key in the OS keyring
pub fn store_api_key(key: &str) -> AppResult<()> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)?;
    entry.set_password(key.trim())?;
    log::info!("[Config] API key stored in keyring");
    Ok(())
}
