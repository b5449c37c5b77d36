//! # Ollama HTTP Client
//!
//! Wrapper around the local Ollama REST API used by the breakdown pipeline.
//!
//! Every pass goes through `/api/generate` with `format: "json"`, which
//! constrains the model to emit a single JSON object; the reply's
//! `response` string is then parsed again into structured data.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from the model client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Cannot reach the Ollama server.
    #[error("Cannot connect to Ollama at {0}")]
    ConnectionFailed(String),
    /// The requested model tag is not pulled on this server.
    #[error("Model '{0}' not found on the Ollama server (try `ollama pull {0}`)")]
    ModelNotFound(String),
    /// Ollama returned a non-success status.
    #[error("Ollama server error ({0}): {1}")]
    ServerError(u16, String),
    /// The reply body was not the JSON the pass asked for.
    #[error("Malformed model reply: {0}")]
    MalformedReply(String),
}

/// HTTP client bound to one Ollama server and model tag.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    /// Create a client with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConnectionFailed(format!("{base_url}: {e}")))?;
        Ok(Self {
            http,
            base_url,
            model: model.into(),
            temperature,
        })
    }

    /// The model tag this client generates with.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Preflight probe: is the server up, and is the model pulled?
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;
        if !resp.status().is_success() {
            return Err(ClientError::ServerError(
                resp.status().as_u16(),
                "tags probe failed".to_string(),
            ));
        }
        let tags: Value = resp
            .json()
            .await
            .map_err(|e| ClientError::MalformedReply(e.to_string()))?;
        let known = tags["models"]
            .as_array()
            .map(|models| {
                models.iter().any(|m| {
                    m["name"]
                        .as_str()
                        .is_some_and(|name| name == self.model || name.starts_with(&self.model))
                })
            })
            .unwrap_or(false);
        if !known {
            return Err(ClientError::ModelNotFound(self.model.clone()));
        }
        Ok(())
    }

    /// Run one constrained-JSON generation and parse the reply object.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<Value, ClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "system": system,
            "prompt": prompt,
            "stream": false,
            "format": "json",
            "options": { "temperature": self.temperature },
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::ModelNotFound(self.model.clone()));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), text));
        }

        let reply: Value = resp
            .json()
            .await
            .map_err(|e| ClientError::MalformedReply(e.to_string()))?;
        let response = reply["response"]
            .as_str()
            .ok_or_else(|| ClientError::MalformedReply("missing 'response' field".to_string()))?;

        serde_json::from_str(response)
            .map_err(|e| ClientError::MalformedReply(format!("inner JSON: {e}")))
    }
}
