//! OpenAI chat-completion client.
//!
//! Invokes the chat completions endpoint twice per generation: once
//! with the budgeted lyric prompt, and once to title the result.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default chat model for lyric and title generation.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client for the given chat model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("versify/0.1.0 (https://github.com/versify-dev/versify)")
                .timeout(Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model,
        }
    }

    /// Send a (system, user) prompt pair, optionally capping the
    /// response length, and return the first choice's content.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: Option<u32>,
    ) -> ProviderResult<String> {
        let request = ChatRequest {
            model: &self.model,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                provider: "OpenAI".to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|e| ProviderError::Http {
                provider: "OpenAI".to_string(),
                message: e.to_string(),
            })?;

        let parsed: ChatResponse =
            response.json().await.map_err(|e| ProviderError::Parse {
                provider: "OpenAI".to_string(),
                message: e.to_string(),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::EmptyResponse {
                provider: "OpenAI".to_string(),
            })
    }

    /// Generate a title for freshly generated lyrics.
    pub async fn song_title(&self, lyrics: &str) -> ProviderResult<String> {
        let user = format!(
            "Create an appropriate song title for these lyrics: {lyrics}. Make sure \
             to give only the song name and no other additional text."
        );
        let title = self
            .complete(
                "You are a song title generator based on given song lyrics",
                &user,
                None,
            )
            .await?;
        Ok(title.trim().trim_matches('"').to_string())
    }
}
