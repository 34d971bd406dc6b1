use anyhow::{Context, Result};
use disclosure_card::{config, content::ContentStore, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("disclosure_card=info".parse()?),
        )
        .init();

    info!("Starting disclosure card service");

    let config = config::Config::from_env()?;

    let content = match &config.content_dir {
        Some(dir) => {
            info!("Loading content from {}", dir);
            ContentStore::from_dir(dir)
        }
        None => ContentStore::embedded(),
    }
    .context("Failed to load content tables")?;

    info!(
        "Default source language: {}",
        config.default_source_language.name()
    );

    let state = server::AppState::new(content, config.default_source_language);
    server::serve(&config, state).await
}
