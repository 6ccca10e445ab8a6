//! Client for the hosted "invoke LLM" capability
//!
//! One POST per call, JSON in and JSON out. No retries: failures surface as
//! [`Error::Transport`] so callers never mistake them for a benign answer.

use async_trait::async_trait;
use cybersakhi_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::classifier::{ClassificationRequest, TextClassifier};
use crate::harassment::{response_schema, ClassificationResult};
use crate::prompts::harassment_prompt;

/// Free-text completion capability used by the assistant
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete a fully rendered prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Request body of the invoke call
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_json_schema: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    add_context_from_internet: bool,
}

/// Connection settings for [`LlmClient`]
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    /// Let chat completions pull context from the web
    pub chat_context_from_internet: bool,
}

/// HTTP client for the hosted LLM
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmClientConfig,
}

impl LlmClient {
    pub fn new(config: LlmClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send one prompt and return the decoded JSON response body.
    pub async fn invoke(
        &self,
        prompt: &str,
        response_json_schema: Option<Value>,
        add_context_from_internet: bool,
    ) -> Result<Value> {
        let body = InvokeRequest {
            prompt,
            response_json_schema,
            add_context_from_internet,
        };

        let mut request = self.http.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            error!("LLM request failed: {}", e);
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("LLM backend returned {}", status);
            return Err(Error::transport(format!("backend returned {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {}", e)))?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            bytes = text.len(),
            "LLM response received"
        );

        serde_json::from_str(&text)
            .map_err(|e| Error::schema(format!("response body is not JSON: {}", e)))
    }
}

#[async_trait]
impl TextClassifier for LlmClient {
    async fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult> {
        let prompt = harassment_prompt(&request.text);
        let value = self
            .invoke(&prompt, Some(response_schema()), false)
            .await?;
        ClassificationResult::from_response(&value)
    }

    fn name(&self) -> &str {
        "hosted-llm"
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let value = self
            .invoke(prompt, None, self.config.chat_context_from_internet)
            .await?;
        completion_text(value)
    }
}

/// Extract the reply text from a completion response.
///
/// The capability answers with either a bare JSON string or an object that
/// carries the text under `response` or `content`.
fn completion_text(value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Object(mut obj) => ["response", "content"]
            .iter()
            .find_map(|key| match obj.remove(*key) {
                Some(Value::String(text)) => Some(text),
                _ => None,
            })
            .ok_or_else(|| Error::schema("completion object has no text field")),
        other => Err(Error::schema(format!(
            "unexpected completion payload: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completion_text_variants() {
        assert_eq!(completion_text(json!("hi there")).unwrap(), "hi there");
        assert_eq!(
            completion_text(json!({"response": "from object"})).unwrap(),
            "from object"
        );
        assert_eq!(
            completion_text(json!({"content": "from content"})).unwrap(),
            "from content"
        );
        assert!(matches!(
            completion_text(json!({"other": 1})),
            Err(Error::Schema(_))
        ));
        assert!(matches!(completion_text(json!(42)), Err(Error::Schema(_))));
    }

    #[test]
    fn test_invoke_request_shape() {
        let body = InvokeRequest {
            prompt: "hello",
            response_json_schema: Some(response_schema()),
            add_context_from_internet: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["response_json_schema"]["type"], "object");
        assert!(json.get("add_context_from_internet").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = LlmClient::new(LlmClientConfig {
            // Port 9 (discard) on loopback refuses connections on test hosts.
            endpoint: "http://127.0.0.1:9/invoke".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(2),
            chat_context_from_internet: false,
        })
        .unwrap();

        let err = client
            .classify(&ClassificationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
