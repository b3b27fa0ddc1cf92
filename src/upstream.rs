// src/upstream.rs

//! Binding to the OpenAI Responses API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Failed(String),

    #[error("Failed to reach completion API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Message safe to hand back to the caller, or `fallback` when the error
    /// has nothing to say.
    pub fn client_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

/// A completion service: one prompt in, one raw JSON response out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Value, UpstreamError>;
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Client for `POST {base_url}/responses`. Built without a request timeout;
/// connection pooling is left to reqwest.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&ResponsesRequest {
                model,
                input: prompt,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: api_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        let body: Value = response.json().await.map_err(UpstreamError::Decode)?;

        // A completed response carries `"error": null`; anything else is a failed run.
        if let Some(message) = body
            .get("error")
            .filter(|e| !e.is_null())
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return Err(UpstreamError::Failed(message.to_string()));
        }

        Ok(body)
    }
}

/// Reads `error.message` from an API error body, falling back to the raw body.
fn api_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .trim();

    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
