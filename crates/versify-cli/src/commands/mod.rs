use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use versify_core::{Discography, GraphBuilder, LyricStore};
use versify_providers::{CohereClient, Config};

pub mod config;
pub mod generate;
pub mod top;

pub use config::run_config;
pub use generate::run_generate;
pub use top::run_top;

/// Load configuration, honoring the global `--db` override.
fn load_config(db: Option<PathBuf>) -> Result<Config> {
    match db {
        Some(path) => Config::load_with_db_path(path),
        None => Config::load(),
    }
}

/// Load the artist's similarity graph from cache, or build it from the
/// lyrics database and fresh embeddings.
async fn load_or_build_discography(
    store: &LyricStore,
    config: &Config,
    artist: &str,
    threshold: Option<f32>,
    no_cache: bool,
) -> Result<Discography> {
    // The cache does not record the threshold a graph was built at, so
    // an explicit --threshold forces a rebuild just like --no-cache.
    if !no_cache && threshold.is_none() {
        if let Some(discography) = store.cached_discography(artist)? {
            tracing::info!(
                "using cached similarity graph for {} ({} songs, {} edges)",
                discography.artist_name(),
                discography.len(),
                discography.edge_count()
            );
            return Ok(discography);
        }
    }

    if !store.artist_exists(artist)? {
        bail!("artist '{artist}' not found in the lyrics database");
    }
    let rows = store.songs_for_artist(artist)?;
    if rows.is_empty() {
        bail!("no songs stored for artist '{artist}'");
    }

    let cohere_key = config
        .cohere_api_key
        .clone()
        .context("Cohere API key not configured (set VERSIFY_COHERE_API_KEY or run 'versify config init')")?;
    let embedder = CohereClient::new(cohere_key, config.embedding_model.clone());

    tracing::info!("embedding {} songs for {artist}", rows.len());
    let mut discography = Discography::new(artist)?;
    for row in rows {
        let embedding = embedder.embed_one(&row.lyrics).await?;
        discography.add_song(row.title, row.lyrics, embedding)?;
    }

    let builder = GraphBuilder::new(threshold.unwrap_or(config.similarity_threshold))?;
    let edges = builder.build(&mut discography)?;
    tracing::info!(
        "built similarity graph for {artist}: {} songs, {edges} edges at threshold {}",
        discography.len(),
        builder.threshold()
    );

    store.cache_discography(&discography)?;
    Ok(discography)
}
