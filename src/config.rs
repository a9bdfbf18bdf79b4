//! Provider key configuration.
//!
//! The serving layer exposes one tiny config payload with both backend API
//! keys. Callers hold the keys in an explicit [`ProviderKeys`] value (or a
//! [`KeyCell`] when they want the original fetch-once-and-reuse behavior)
//! and pass it to the prompt-building collaborator; there is no global.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::key::AiModel;

/// Error type for provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The key for the requested backend is unset or blank.
    #[error("{model} API key is not configured")]
    MissingKey { model: AiModel },

    /// The configuration source could not be reached.
    #[error("failed to load provider configuration: {0}")]
    Load(String),

    /// The configuration payload did not parse.
    #[error("invalid provider configuration: {0}")]
    Parse(String),
}

/// The config payload served to the client: one key per backend, empty
/// string when the deployment has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderKeys {
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub gemini_api_key: String,
}

impl ProviderKeys {
    pub fn new(openai_api_key: impl Into<String>, gemini_api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: openai_api_key.into(),
            gemini_api_key: gemini_api_key.into(),
        }
    }

    /// Parses the JSON config payload.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` when the payload is not the expected shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// The key for `model`.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingKey` when the key is unset or blank, so
    /// callers surface "not configured" before ever talking to the backend.
    pub fn key_for(&self, model: AiModel) -> Result<&str, ConfigError> {
        let key = match model {
            AiModel::OpenAi => &self.openai_api_key,
            AiModel::Gemini => &self.gemini_api_key,
        };
        if key.trim().is_empty() {
            return Err(ConfigError::MissingKey { model });
        }
        Ok(key)
    }
}

/// Fetch-once holder for [`ProviderKeys`].
///
/// Scoped initialization guard around the keys: the loader runs at most once
/// per successful initialization, every later call reuses the stored value,
/// and a failed load leaves the cell empty so the next call can retry.
#[derive(Debug, Default)]
pub struct KeyCell(OnceLock<ProviderKeys>);

impl KeyCell {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// The keys, if already fetched.
    pub fn get(&self) -> Option<&ProviderKeys> {
        self.0.get()
    }

    /// Returns the cached keys, running `fetch` on first use.
    ///
    /// # Errors
    /// Propagates the loader's error; the cell stays empty in that case.
    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<&ProviderKeys, ConfigError>
    where
        F: FnOnce() -> Result<ProviderKeys, ConfigError>,
    {
        if let Some(keys) = self.0.get() {
            return Ok(keys);
        }
        let keys = fetch()?;
        Ok(self.0.get_or_init(|| keys))
    }
}
