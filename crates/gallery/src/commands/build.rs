//! Public directory build command.

use anyhow::{Context, Result};
use gallery_static::{BuildConfig, BuildResult, PublicBuilder};

use crate::config::Config;

/// Run the build command.
pub async fn run(config: &Config, no_index: bool) -> Result<()> {
    tracing::info!("Building public directory...");

    let mut build_config = config.build_config();
    if no_index {
        build_config.index = false;
    }

    let result = build(build_config).await?;

    tracing::info!(
        "Created {} directories, copied {} files and {} static files in {}ms",
        result.dirs_created,
        result.files_copied,
        result.static_files,
        result.duration_ms
    );
    if let Some(projects) = result.projects {
        tracing::info!("Indexed {} projects", projects);
    }
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

/// Run a build off the async runtime.
pub async fn build(config: BuildConfig) -> Result<BuildResult> {
    let result = tokio::task::spawn_blocking(move || PublicBuilder::new(config).build())
        .await
        .context("Build task panicked")??;

    Ok(result)
}
