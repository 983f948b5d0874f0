//! External collaborators for versify.
//!
//! Cohere embedding and OpenAI chat-completion clients, a
//! tiktoken-backed token counter, rate limiting, and layered
//! configuration. Everything that performs I/O lives here; the core
//! stays pure.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod resilience;
pub mod tokenizer;

pub use completion::OpenAiClient;
pub use config::Config;
pub use embedding::CohereClient;
pub use error::{ProviderError, ProviderResult};
pub use tokenizer::ModelTokenCounter;
