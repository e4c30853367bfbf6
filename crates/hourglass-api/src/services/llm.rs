// Language-model completion client
// Decision: Single-turn, non-streaming chat completions only — the assistant
// page asks one question at a time and the caller falls back to canned text

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use hourglass_core::CoreError;

use crate::config::LlmConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SYSTEM_PROMPT: &str = "You are an assistant embedded in an agency timesheet \
dashboard. Answer questions about time tracking, utilization, and client billing \
briefly and concretely.";

/// Client for the hosted completion endpoint.
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    config: Option<LlmConfig>,
}

impl LlmService {
    pub fn new(config: Option<LlmConfig>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Whether an API key is configured at all.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Ask the model a single question.
    ///
    /// Fails with `CoreError::Downstream` when unconfigured or when the
    /// endpoint misbehaves; the caller decides what to serve instead.
    pub async fn complete(&self, question: &str) -> Result<String, CoreError> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| CoreError::downstream("LLM endpoint not configured"))?;

        let request = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(&config.base_url)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::downstream(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CoreError::downstream("completion response had no choices"))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
