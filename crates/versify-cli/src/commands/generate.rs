use std::path::PathBuf;

use anyhow::{Context, Result};

use versify_core::{select_top_k, LyricStore, PromptBudgeter, TOP_K};
use versify_providers::{ModelTokenCounter, OpenAiClient};

use super::{load_config, load_or_build_discography};

pub async fn run_generate(
    artist: String,
    db: Option<PathBuf>,
    threshold: Option<f32>,
    budget: Option<usize>,
    no_cache: bool,
) -> Result<()> {
    let config = load_config(db)?;
    let store = LyricStore::open(&config.database_path)?;

    let discography =
        load_or_build_discography(&store, &config, &artist, threshold, no_cache).await?;

    let songs = select_top_k(&discography, TOP_K)?;
    tracing::info!(
        "selected {} reference songs: {}",
        songs.len(),
        songs
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let counter = ModelTokenCounter::for_model(&config.completion_model)?;
    let budgeter = PromptBudgeter::new(budget.unwrap_or(config.token_budget))?;
    let prompt = budgeter.build(songs, &counter)?;
    tracing::info!(
        "prompt uses {} songs at {} tokens (budget {})",
        prompt.songs_used,
        prompt.tokens,
        budgeter.limit()
    );

    let openai_key = config
        .openai_api_key
        .clone()
        .context("OpenAI API key not configured (set VERSIFY_OPENAI_API_KEY or run 'versify config init')")?;
    let client = OpenAiClient::new(openai_key, config.completion_model.clone());

    let lyrics = client
        .complete(&prompt.system, &prompt.user, Some(config.response_tokens))
        .await?;
    let title = client.song_title(&lyrics).await?;

    println!("\n{title}");
    println!("{}", "=".repeat(title.chars().count()));
    println!("\n{lyrics}");
    println!("\n✓ Generated in the style of {}", discography.artist_name());

    Ok(())
}
