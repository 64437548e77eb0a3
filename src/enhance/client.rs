//! Chat-completions API client
//!
//! Single point of entry for hosted LLM calls. Wraps the OpenAI-style
//! chat completions endpoint with retry logic and exponential backoff.

use crate::config::ApiConfig;
use crate::error::{CvEnhancerError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for the chat completions API.
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
}

impl ChatClient {
    pub fn new(config: &ApiConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries.max(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user prompt with the given system prompt and return the
    /// completion text. Retries on 429, 5xx and transport errors with
    /// exponential backoff (1s, 2s, 4s).
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut last_error: Option<CvEnhancerError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "API call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CvEnhancerError::Network(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("API returned {}: {}", status, body);
                last_error = Some(CvEnhancerError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Pull the human-readable message out of the error envelope
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(CvEnhancerError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return completion_text(chat_response);
        }

        Err(last_error.unwrap_or(CvEnhancerError::ApiUnavailable {
            attempts: self.max_retries,
        }))
    }
}

/// Extract the trimmed text of the first choice, rejecting empty completions.
fn completion_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(CvEnhancerError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_response(json: &str) -> ChatResponse {
        serde_json::from_str(json).expect("valid response JSON")
    }

    #[test]
    fn test_completion_text_from_first_choice() {
        let response = parse_response(
            r#"{
                "choices": [
                    {"message": {"role": "assistant", "content": "  Enhanced text.  "}}
                ],
                "usage": {"prompt_tokens": 42, "completion_tokens": 7}
            }"#,
        );

        let text = completion_text(response).unwrap();
        assert_eq!(text, "Enhanced text.");
    }

    #[test]
    fn test_completion_text_no_choices() {
        let response = parse_response(r#"{"choices": []}"#);
        let err = completion_text(response).unwrap_err();
        assert!(matches!(err, CvEnhancerError::EmptyCompletion));
    }

    #[test]
    fn test_completion_text_null_content() {
        let response = parse_response(r#"{"choices": [{"message": {"content": null}}]}"#);
        let err = completion_text(response).unwrap_err();
        assert!(matches!(err, CvEnhancerError::EmptyCompletion));
    }

    #[test]
    fn test_completion_text_whitespace_only() {
        let response = parse_response(r#"{"choices": [{"message": {"content": "   \n  "}}]}"#);
        let err = completion_text(response).unwrap_err();
        assert!(matches!(err, CvEnhancerError::EmptyCompletion));
    }

    #[test]
    fn test_request_serializes_both_roles() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are an editor.",
                },
                ChatMessage {
                    role: "user",
                    content: "Improve this.",
                },
            ],
            temperature: 0.7,
            max_tokens: 1000,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 1000);
    }
}
