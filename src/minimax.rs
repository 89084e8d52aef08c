//! MiniMax chat-completion client
//!
//! Thin wrapper over the MiniMax v2 chat endpoint.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::Config;
use crate::error::DiligenceError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

const MINIMAX_BASE_URL: &str = "https://api.minimax.io/v1/text/chatcompletion_v2";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Seam for the two language-model calls in the pipeline.
/// Lets the profile extractor and memo generator run against a mock
/// in tests instead of the live endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Reusable MiniMax client (connection-pooled)
pub struct MiniMaxClient {
    client: Client,
    api_key: String,
    group_id: String,
    model: String,
    base_url: String,
}

impl MiniMaxClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: config.minimax_api_key.trim().to_string(),
            group_id: config.minimax_group_id.trim().to_string(),
            model: config.model.clone(),
            base_url: MINIMAX_BASE_URL.to_string(),
        }
    }

    /// Credentials are checked here, at call time, so a missing key never
    /// produces a network call.
    fn check_credentials(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(DiligenceError::Config(
                "MINIMAX_API_KEY is not set. Add it to your .env file.".to_string(),
            ));
        }
        if self.group_id.is_empty() {
            return Err(DiligenceError::Config(
                "MINIMAX_GROUP_ID is not set. Add it to your .env file.".to_string(),
            ));
        }
        Ok(())
    }

    async fn chat_completion(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.check_credentials()?;

        let url = format!("{}?GroupId={}", self.base_url, self.group_id);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 2000,
        };

        info!(model = %self.model, "Calling MiniMax API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("MiniMax API request failed: {}", e);
                DiligenceError::Upstream(format!("MiniMax API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_upstream_error(&body).unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.clone()
                }
            });
            error!("MiniMax API error response ({}): {}", status, message);
            return Err(DiligenceError::Upstream(format!(
                "MiniMax API error: {}",
                message
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse MiniMax response: {}", e);
            DiligenceError::Upstream(format!("MiniMax response was not valid JSON: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                DiligenceError::Upstream(
                    "MiniMax API response missing message content".to_string(),
                )
            })?;

        info!("MiniMax response received ({} chars)", content.len());

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ChatModel for MiniMaxClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.chat_completion(system_prompt, user_prompt).await
    }
}

/// Pull a structured error message out of an upstream error body,
/// falling back to the raw body at the call site when the shape is off.
fn extract_upstream_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
