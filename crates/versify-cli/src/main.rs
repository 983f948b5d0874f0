use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "versify", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the lyrics database (default: ~/.local/share/versify/lyrics.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Generate a new song in the style of an artist
    ///
    /// Builds a lyrical-similarity graph over the artist's songs and uses it
    /// to assemble a generation prompt:
    ///
    /// - Fetches the artist's songs (most viewed first, up to 100) from the
    ///   lyrics database
    /// - Embeds each lyric via the Cohere API, then connects songs whose
    ///   embedding cosine similarity exceeds the threshold
    /// - Selects the five most connected songs as style references
    /// - Trims the reference list until the prompt fits the token budget
    /// - Asks the chat model for original lyrics, then for a title
    ///
    /// Built graphs are cached in the database and reused on subsequent
    /// runs for the same artist; pass --no-cache to rebuild from scratch.
    ///
    /// Requires Cohere and OpenAI API keys (see 'versify config').
    Generate {
        /// Artist whose style to imitate
        artist: String,

        /// Cosine-similarity threshold for connecting songs (0.6 - 0.8 are
        /// sensible; default 0.75)
        #[arg(long)]
        threshold: Option<f32>,

        /// Hard cap on prompt tokens (default 3200)
        #[arg(long)]
        budget: Option<usize>,

        /// Rebuild the similarity graph even if a cached one exists
        #[arg(long)]
        no_cache: bool,
    },
    /// Show an artist's most connected songs
    ///
    /// Builds (or loads from cache) the similarity graph and prints the five
    /// songs with the most similarity edges - the songs that would seed a
    /// generation prompt. Requires a Cohere API key unless a cached graph
    /// exists.
    Top {
        /// Artist to inspect
        artist: String,

        /// Cosine-similarity threshold for connecting songs
        #[arg(long)]
        threshold: Option<f32>,

        /// Rebuild the similarity graph even if a cached one exists
        #[arg(long)]
        no_cache: bool,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Show the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            artist,
            threshold,
            budget,
            no_cache,
        } => {
            commands::run_generate(artist, cli.db, threshold, budget, no_cache).await?;
        }
        Commands::Top {
            artist,
            threshold,
            no_cache,
        } => {
            commands::run_top(artist, cli.db, threshold, no_cache).await?;
        }
        Commands::Config { action } => {
            commands::run_config(action)?;
        }
    }

    Ok(())
}
