//! Project index command.

use anyhow::{Context, Result};
use gallery_static::ProjectIndex;

use crate::config::Config;

/// Regenerate the project index page without copying anything.
pub async fn run(config: &Config) -> Result<()> {
    let root = config.root.clone();
    let output = config.public_dir().join("index.html");

    tracing::info!("Scanning projects in {}", root.display());

    let count = tokio::task::spawn_blocking(move || ProjectIndex::new(root).build(&output))
        .await
        .context("Index task panicked")??;

    tracing::info!(
        "Wrote {} with {} projects",
        config.public_dir().join("index.html").display(),
        count
    );

    Ok(())
}
