//! Gemini configuration, wire types and errors

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the API base URL.
pub const GEMINI_BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Environment variable overriding the model name.
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";

/// Default Generative Language API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini API configuration
///
/// Built once at startup and moved into [`super::GenAiClient`]; the key is
/// never re-read from the environment after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiConfig {
    /// API key passed in the `x-goog-api-key` header
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name (e.g. `gemini-2.0-flash`)
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl GenAiConfig {
    /// Load configuration from the process environment.
    ///
    /// The key's value is not validated here; an invalid key surfaces only
    /// when the remote API rejects it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR)
            .map_err(|_| ConfigError::MissingVar(GEMINI_API_KEY_VAR))?;

        Ok(Self {
            api_key,
            base_url: std::env::var(GEMINI_BASE_URL_VAR).unwrap_or_else(|_| default_base_url()),
            model: std::env::var(GEMINI_MODEL_VAR).unwrap_or_else(|_| default_model()),
        })
    }

    /// Build a config with the given key and default endpoint settings
    pub fn for_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

/// Response body for `models/{model}:generateContent`
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error detail wrapper returned by the API on failure
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}

/// Gemini client error types
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
