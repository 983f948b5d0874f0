//! Cohere embedding client.
//!
//! Turns lyric text into fixed-length embedding vectors via the Cohere
//! `/v1/embed` endpoint. The free tier allows 100 requests per minute,
//! which is also why callers cap a discography at 100 songs.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::resilience::RateLimiter;

const COHERE_EMBED_URL: &str = "https://api.cohere.ai/v1/embed";

/// Default Cohere embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embed-english-v2.0";

/// Free-tier request cap.
const EMBED_REQUESTS_PER_MINUTE: u32 = 100;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Cohere API client.
///
/// Wraps an HTTP client, an API key, and a rate limiter tuned to the
/// free-tier limit. Transient failures are retried with exponential
/// backoff; retry policy deliberately lives here, outside the core.
#[derive(Debug, Clone)]
pub struct CohereClient {
    http: Client,
    api_key: String,
    model: String,
    rate_limiter: RateLimiter,
}

impl CohereClient {
    /// Create a new Cohere client for the given embedding model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("versify/0.1.0 (https://github.com/versify-dev/versify)")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model,
            rate_limiter: RateLimiter::per_minute(EMBED_REQUESTS_PER_MINUTE),
        }
    }

    /// Embed a single lyric text.
    pub async fn embed_one(&self, text: &str) -> ProviderResult<Vec<f32>> {
        let mut embeddings = self.embed(&[text.to_string()]).await?;
        embeddings.pop().ok_or_else(|| ProviderError::EmptyResponse {
            provider: "Cohere".to_string(),
        })
    }

    /// Embed a batch of texts, one vector per input, in input order.
    pub async fn embed(&self, texts: &[String]) -> ProviderResult<Vec<Vec<f32>>> {
        self.rate_limiter.acquire().await;

        let embeddings = (|| async { self.request(texts).await })
            .retry(ExponentialBuilder::default())
            .when(ProviderError::is_transient)
            .notify(|err, dur| {
                log::warn!("Cohere embed failed ({err}); retrying in {dur:?}");
            })
            .await?;

        if embeddings.len() != texts.len() {
            return Err(ProviderError::Parse {
                provider: "Cohere".to_string(),
                message: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    embeddings.len()
                ),
            });
        }
        Ok(embeddings)
    }

    async fn request(&self, texts: &[String]) -> ProviderResult<Vec<Vec<f32>>> {
        let response = self
            .http
            .post(COHERE_EMBED_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                texts,
            })
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                provider: "Cohere".to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|e| ProviderError::Http {
                provider: "Cohere".to_string(),
                message: e.to_string(),
            })?;

        let parsed: EmbedResponse =
            response.json().await.map_err(|e| ProviderError::Parse {
                provider: "Cohere".to_string(),
                message: e.to_string(),
            })?;

        Ok(parsed.embeddings)
    }
}
