//! Remote feedback over an OpenAI-style chat-completions endpoint
//!
//! Retries on rate limits and server errors with exponential backoff,
//! then gives up quietly: the caller always gets a (possibly empty)
//! suggestion list, never an error.

use crate::config::LlmConfig;
use crate::error::{CoachError, Result};
use crate::llm::FeedbackProvider;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str =
    "You are a strict interview coach. Reply with three short bullet points \
     of feedback and a one-line summary.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct RemoteFeedback {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl RemoteFeedback {
    /// Build a provider from configuration. Returns `None` when no
    /// endpoint is configured or the key environment variable is unset,
    /// which callers treat exactly like the no-op provider.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let api_base = config.api_base.clone()?;
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())?;

        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Could not build HTTP client for LLM feedback: {}", e);
                return None;
            }
        };

        Some(Self {
            client,
            api_base,
            api_key,
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    async fn request_feedback(&self, question: &str, answer: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.api_base.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Question: {}\nAnswer: {}", question, answer),
                },
            ],
            temperature: 0.3,
        };

        let mut last_error: Option<CoachError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                debug!(
                    "LLM feedback attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = Some(CoachError::LlmFeedback(format!(
                    "endpoint returned {}",
                    status
                )));
                continue;
            }
            if !status.is_success() {
                return Err(CoachError::LlmFeedback(format!(
                    "endpoint returned {}",
                    status
                )));
            }

            let parsed: ChatResponse = response.json().await?;
            return parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    CoachError::LlmFeedback("endpoint returned no choices".to_string())
                });
        }

        Err(last_error
            .unwrap_or_else(|| CoachError::LlmFeedback("retries exhausted".to_string())))
    }
}

impl FeedbackProvider for RemoteFeedback {
    async fn supplement(&self, question: &str, answer: &str) -> Vec<String> {
        match self.request_feedback(question, answer).await {
            Ok(content) => split_feedback(&content),
            Err(e) => {
                warn!("LLM feedback unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

/// Split free-text commentary into individual suggestion lines,
/// stripping bullet and numbering prefixes.
fn split_feedback(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_split_feedback_strips_bullets_and_numbers() {
        let content = "- Quantify the result\n* Trim the intro\n2) Name the metric\n\nSolid story overall.";
        let lines = split_feedback(content);
        assert_eq!(
            lines,
            vec![
                "Quantify the result",
                "Trim the intro",
                "Name the metric",
                "Solid story overall.",
            ]
        );
    }

    #[test]
    fn test_from_config_without_endpoint_is_none() {
        let config = Config::default().llm;
        assert!(config.api_base.is_none());
        assert!(RemoteFeedback::from_config(&config).is_none());
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let mut config = Config::default().llm;
        config.api_base = Some("https://api.example.com/v1".to_string());
        config.api_key_env = "INTERVIEW_COACH_TEST_KEY_UNSET".to_string();
        assert!(RemoteFeedback::from_config(&config).is_none());
    }
}
