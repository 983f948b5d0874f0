use anyhow::Result;

use versify_providers::{config, Config};

use crate::ConfigAction;

pub fn run_config(action: Option<ConfigAction>) -> Result<()> {
    match action {
        None | Some(ConfigAction::Show) => show_config(),
        Some(ConfigAction::Path) => show_path(),
        Some(ConfigAction::Example) => show_example(),
        Some(ConfigAction::Init) => init_config(),
    }
}

/// Show the current effective configuration.
fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!(
        "  cohere_api_key: {}",
        if config.cohere_api_key.is_some() { "<set>" } else { "<not set>" }
    );
    println!(
        "  openai_api_key: {}",
        if config.openai_api_key.is_some() { "<set>" } else { "<not set>" }
    );
    println!("  database_path: {}", config.database_path.display());
    println!("  similarity_threshold: {}", config.similarity_threshold);
    println!("  token_budget: {}", config.token_budget);
    println!("  response_tokens: {}", config.response_tokens);
    println!("  completion_model: {}", config.completion_model);
    println!("  embedding_model: {}", config.embedding_model);

    println!("\nPriority: CLI args > ENV vars (VERSIFY_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to add your Cohere and OpenAI API keys.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
