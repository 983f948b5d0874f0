//! Provider error types.

use thiserror::Error;

/// Errors that can occur while talking to an external provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An HTTP request to a provider failed.
    #[error("HTTP error from {provider}: {message}")]
    Http { provider: String, message: String },

    /// The provider returned a rate-limit response.
    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    /// A response from a provider could not be parsed.
    #[error("parse error from {provider}: {message}")]
    Parse { provider: String, message: String },

    /// No API key is configured for the provider.
    #[error("missing API key for {provider}")]
    MissingApiKey { provider: String },

    /// The tokenizer has no vocabulary for the requested model.
    #[error("no tokenizer available for model {model}")]
    UnsupportedModel { model: String },

    /// The provider responded successfully but with no usable content.
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProviderError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Convenience alias for provider results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl From<ProviderError> for versify_core::Error {
    fn from(err: ProviderError) -> Self {
        let service = match &err {
            ProviderError::Http { provider, .. }
            | ProviderError::RateLimited { provider }
            | ProviderError::Parse { provider, .. }
            | ProviderError::MissingApiKey { provider }
            | ProviderError::EmptyResponse { provider } => provider.clone(),
            ProviderError::UnsupportedModel { .. } => "tokenizer".to_string(),
            ProviderError::Request(_) => "http".to_string(),
        };
        Self::External {
            service,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let http = ProviderError::Http {
            provider: "Cohere".to_string(),
            message: "503".to_string(),
        };
        let limited = ProviderError::RateLimited {
            provider: "Cohere".to_string(),
        };
        let missing = ProviderError::MissingApiKey {
            provider: "OpenAI".to_string(),
        };
        assert!(http.is_transient());
        assert!(limited.is_transient());
        assert!(!missing.is_transient());
    }

    #[test]
    fn test_conversion_into_core_error() {
        let err = ProviderError::EmptyResponse {
            provider: "OpenAI".to_string(),
        };
        let core: versify_core::Error = err.into();
        assert!(matches!(
            core,
            versify_core::Error::External { service, .. } if service == "OpenAI"
        ));
    }
}
