//! Groq Provider Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Groq is the
//! default, but any endpoint speaking the same protocol works.
//!
//! # Features
//!
//! - Blocking HTTP communication (the pipeline is synchronous)
//! - Configurable endpoint, model and timeout
//! - JSON output mode for structured generation
//!
//! Retries are not handled here; wrap calls in a
//! [`ResilientInvoker`](crate::ResilientInvoker).
//!
//! # Examples
//!
//! ```no_run
//! use autopost_llm::GroqProvider;
//! use autopost_domain::traits::LlmProvider;
//!
//! let provider = GroqProvider::default_endpoint("llama3-8b-8192", "gsk_...").unwrap();
//! let text = provider.generate("Write one line about Rust").unwrap();
//! ```

use crate::config::LlmConfig;
use crate::LlmError;
use autopost_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions provider
#[derive(Clone)]
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full chat-completions URL
    /// - `model`: model identifier (e.g., "llama3-8b-8192")
    /// - `api_key`: bearer token
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider against the default Groq endpoint
    pub fn default_endpoint(model: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Create a provider from configuration and an API key
    pub fn from_config(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let provider = Self::with_timeout(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.timeout(),
        )?;
        Ok(match config.temperature {
            Some(t) => provider.with_temperature(t),
            None => provider,
        })
    }

    fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: None,
            client,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        debug!("Sending {} char prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        match status.as_u16() {
            200..=299 => parse_completion(&body),
            401 | 403 => Err(LlmError::Authentication(body)),
            404 => Err(LlmError::ModelNotAvailable(self.model.clone())),
            429 => Err(LlmError::RateLimitExceeded),
            _ => Err(LlmError::Communication(format!("HTTP {}: {}", status, body))),
        }
    }
}

/// Extract the first choice's text from a chat-completions body
pub(crate) fn parse_completion(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no completion text".to_string()))?;

    if content.trim().is_empty() {
        return Err(LlmError::InvalidResponse("Empty completion".to_string()));
    }

    Ok(content)
}

impl LlmProviderTrait for GroqProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, false)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.complete(prompt, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_provider_creation() {
        let provider = GroqProvider::new("http://localhost:8080/v1/chat/completions", "llama3", "key").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8080/v1/chat/completions");
        assert_eq!(provider.model(), "llama3");
        assert!(provider.temperature.is_none());
    }

    #[test]
    fn test_groq_provider_default_endpoint() {
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, "key")
            .unwrap()
            .with_temperature(0.7);
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.temperature, Some(0.7));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, "secret-key").unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            temperature: None,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Hello"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hello");
    }

    #[test]
    fn test_parse_completion_rejects_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::InvalidResponse(_))));

        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::InvalidResponse(_))));

        assert!(parse_completion("not json").is_err());
    }

    #[test]
    fn test_groq_error_handling() {
        // Nothing listens on port 9 locally
        let provider = GroqProvider::new("http://127.0.0.1:9/v1/chat/completions", "llama3", "key").unwrap();

        match provider.generate("test") {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    #[ignore] // Only run with a real API key in GROQ_API_KEY
    fn test_groq_generate_integration() {
        let Ok(key) = std::env::var("GROQ_API_KEY") else {
            return;
        };
        let provider = GroqProvider::default_endpoint(DEFAULT_MODEL, key).unwrap();
        let response = provider.generate("Say 'hello' and nothing else").unwrap();
        assert!(!response.is_empty());
    }
}
