//! Portal authentication client
//!
//! Thin wrappers over `POST /login`, `POST /register` and `POST /logout`.
//! The client adds no retry, no caching and no status-code interpretation
//! beyond surfacing non-success responses as errors.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use super::types::AuthError;

/// Authentication client for the portal backend
#[derive(Debug)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client
    ///
    /// `base_url` must be an absolute URL; a trailing slash is ignored.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AuthError> {
        Url::parse(base_url).map_err(|e| AuthError::InvalidBaseUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Read the response body, turning non-success statuses into errors
    async fn success_text(response: reqwest::Response) -> Result<String, AuthError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    /// Log in with the given credentials
    ///
    /// Issues exactly one `POST /login` with `credentials` serialized as the
    /// JSON body, unmodified. Resolves with the token string the server
    /// returns in the response body.
    pub async fn login<T: Serialize>(&self, credentials: &T) -> Result<String, AuthError> {
        info!("Logging in");

        let response = self
            .client
            .post(self.endpoint("login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let token = Self::success_text(response).await?;
        debug!("Login response: {}", crate::safe_truncate(&token, 200));

        Ok(token)
    }

    /// Register a new account
    ///
    /// Issues exactly one `POST /register` with `info` serialized as the JSON
    /// body, unmodified. The response is deserialized into the caller's
    /// chosen type; use [`serde_json::Value`] when the shape is unknown.
    pub async fn register<T, R>(&self, info: &T) -> Result<R, AuthError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        info!("Registering account");

        let response = self
            .client
            .post(self.endpoint("register"))
            .json(info)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let text = Self::success_text(response).await?;
        debug!("Registration response: {}", crate::safe_truncate(&text, 500));

        serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }

    /// Log out of the current session
    ///
    /// Issues exactly one `POST /logout` with an empty body and resolves with
    /// whatever the server returned: parsed JSON when the body is JSON, the
    /// raw text otherwise, `Null` when empty.
    pub async fn logout(&self) -> Result<serde_json::Value, AuthError> {
        info!("Logging out");

        let response = self
            .client
            .post(self.endpoint("logout"))
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let text = Self::success_text(response).await?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
