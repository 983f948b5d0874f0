use std::path::PathBuf;

use anyhow::Result;

use versify_core::{select_top_k, LyricStore, TOP_K};

use super::{load_config, load_or_build_discography};

pub async fn run_top(
    artist: String,
    db: Option<PathBuf>,
    threshold: Option<f32>,
    no_cache: bool,
) -> Result<()> {
    let config = load_config(db)?;
    let store = LyricStore::open(&config.database_path)?;

    let discography =
        load_or_build_discography(&store, &config, &artist, threshold, no_cache).await?;
    let songs = select_top_k(&discography, TOP_K)?;

    println!(
        "\n🎵 Most connected songs for {} ({} songs, {} edges)\n",
        discography.artist_name(),
        discography.len(),
        discography.edge_count()
    );
    for song in songs {
        let degree = discography.degree(&song.title).unwrap_or(0);
        println!("  {degree:>3} edges  {}", song.title);
    }

    Ok(())
}
