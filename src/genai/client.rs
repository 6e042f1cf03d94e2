//! Gemini client
//!
//! One handle per process: constructed from [`GenAiConfig`] at startup and
//! shared behind an `Arc` by [`crate::AppState`]. The key travels in the
//! `x-goog-api-key` header on every request.

use reqwest::Client;
use tracing::{debug, info};

use super::types::*;

/// Client for the Generative Language API
pub struct GenAiClient {
    config: GenAiConfig,
    client: Client,
}

impl GenAiClient {
    /// Create a new Gemini client
    ///
    /// The key's value is taken as-is; validation happens server-side on
    /// first use.
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// The configured API key
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Generate text for a single user prompt
    ///
    /// Issues one `POST models/{model}:generateContent` and returns the first
    /// candidate's concatenated text parts.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        info!("Generating content with model {}", self.config.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Generation response: {}", crate::safe_truncate(&text, 500));

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GenAiError::InvalidResponse(e.to_string()))?;

        let output: String = parsed
            .candidates
            .first()
            .ok_or_else(|| GenAiError::InvalidResponse("no candidates in response".to_string()))?
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, api_key: &str) -> GenAiConfig {
        GenAiConfig {
            api_key: api_key.to_string(),
            base_url: server.uri(),
            model: "gemini-2.0-flash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_sends_configured_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "key-abc-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GenAiClient::new(config_for(&server, "key-abc-123"));
        let output = client.generate("say hi").await.unwrap();
        assert_eq!(output, "Hello world");
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error() {
        let server = MockServer::start().await;

        // One failed call stays one call
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "API key not valid"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GenAiClient::new(config_for(&server, "bad-key"));
        let err = client.generate("say hi").await.unwrap_err();
        match err {
            GenAiError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GenAiClient::new(config_for(&server, "k"));
        let err = client.generate("say hi").await.unwrap_err();
        assert!(matches!(err, GenAiError::InvalidResponse(_)));
    }

    #[test]
    fn test_config_round_trips_key() {
        let config = GenAiConfig::for_key("exact-key-value");
        let client = GenAiClient::new(config);
        assert_eq!(client.api_key(), "exact-key-value");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_generate_url_shape() {
        let client = GenAiClient::new(GenAiConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            model: "gemini-2.0-flash".to_string(),
        });
        assert_eq!(
            client.generate_url(),
            "http://localhost:8080/models/gemini-2.0-flash:generateContent"
        );
    }
}
