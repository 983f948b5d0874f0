use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use versify_core::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOKEN_BUDGET};

use crate::completion::DEFAULT_COMPLETION_MODEL;
use crate::embedding::DEFAULT_EMBEDDING_MODEL;

/// Tokens reserved for the completion response out of the model's
/// context window.
pub const DEFAULT_RESPONSE_TOKENS: u32 = 800;

/// Configuration for versify.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VERSIFY_* prefix)
/// 3. Config file (~/.config/versify/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cohere API key (required for embedding lyrics).
    ///
    /// Can be set via:
    /// - ENV: VERSIFY_COHERE_API_KEY
    /// - Config: cohere_api_key = "..."
    pub cohere_api_key: Option<String>,

    /// OpenAI API key (required for lyric and title generation).
    ///
    /// Can be set via:
    /// - ENV: VERSIFY_OPENAI_API_KEY
    /// - Config: openai_api_key = "..."
    pub openai_api_key: Option<String>,

    /// Path to the lyrics database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: VERSIFY_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/versify/lyrics.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Cosine-similarity threshold above which two songs share an
    /// edge. Graph density (and hence degree ranking) is sensitive to
    /// this; useful values sit roughly between 0.6 and 0.8.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Hard limit on combined prompt tokens.
    #[serde(default = "default_token_budget")]
    pub token_budget: usize,

    /// Tokens reserved for the generated response.
    #[serde(default = "default_response_tokens")]
    pub response_tokens: u32,

    /// Chat model used for lyric and title generation (also selects
    /// the tokenizer used for budgeting).
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Cohere model used for lyric embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cohere_api_key: None,
            openai_api_key: None,
            database_path: default_db_path(),
            similarity_threshold: default_similarity_threshold(),
            token_budget: default_token_budget(),
            response_tokens: default_response_tokens(),
            completion_model: default_completion_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/versify/config.toml
    /// Reads environment variables with VERSIFY_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("versify");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("versify")
        .join("lyrics.db")
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_token_budget() -> usize {
    DEFAULT_TOKEN_BUDGET
}

fn default_response_tokens() -> u32 {
    DEFAULT_RESPONSE_TOKENS
}

fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/versify/config.toml
/// - macOS: ~/Library/Application Support/versify/config.toml
/// - Windows: %APPDATA%\versify\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("versify")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Versify Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VERSIFY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Cohere API key, used to embed song lyrics
#cohere_api_key = "your-cohere-api-key-here"

# OpenAI API key, used to generate lyrics and titles
#openai_api_key = "your-openai-api-key-here"

# Path to the lyrics database
#
# Default: Platform-specific data directory
#database_path = "/path/to/lyrics.db"

# Cosine-similarity threshold for connecting two songs in the graph.
# Higher values produce sparser graphs. Useful range: 0.6 - 0.8.
#similarity_threshold = 0.75

# Hard cap on prompt tokens, leaving context-window headroom for the
# generated response
#token_budget = 3200

# Tokens reserved for the generated response
#response_tokens = 800

# Chat model for generation (also selects the budgeting tokenizer)
#completion_model = "gpt-3.5-turbo"

# Cohere embedding model
#embedding_model = "embed-english-v2.0"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
