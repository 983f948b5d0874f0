//! Core domain model for versify.
//!
//! This crate builds an artist's lyrical-similarity graph from
//! precomputed embedding vectors, selects the most connected songs,
//! and assembles a token-budgeted generation prompt. It is pure,
//! synchronous computation over in-memory data; embedding, completion,
//! and token counting are external collaborators.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod graph;
pub mod model;
pub mod prompt;
pub mod select;
pub mod store;

pub use error::{Error, Result};
pub use graph::{GraphBuilder, DEFAULT_SIMILARITY_THRESHOLD, SMALL_GRAPH_LIMIT};
pub use model::{Discography, Song};
pub use prompt::{BudgetedPrompt, PromptBudgeter, TokenCounter, DEFAULT_TOKEN_BUDGET};
pub use select::{select_top_k, TOP_K};
pub use store::{LyricStore, SongRow};
