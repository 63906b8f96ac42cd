//! Development loop: build, serve, and rebuild on changes.

use anyhow::Result;
use gallery_server::{FileWatcher, GalleryServer};

use crate::commands::build::build;
use crate::config::Config;

/// Run the dev command.
pub async fn run(config: &Config, port: Option<u16>, open: bool) -> Result<()> {
    let build_config = config.build_config();
    build(build_config.clone()).await?;

    let watch_paths = vec![
        config.root.join(&build_config.challenges_dir),
        config.root.join("other"),
    ];
    let (watcher, mut events) = FileWatcher::new(&watch_paths)?;

    tokio::spawn(async move {
        // Dropping the watcher ends the event stream.
        let _watcher = watcher;

        while let Some(event) = events.recv().await {
            tracing::debug!("Changed: {}", event.path().display());
            let mut affects_index = event.affects_index();

            // One rebuild per batch of changes.
            while let Ok(event) = events.try_recv() {
                tracing::debug!("Changed: {}", event.path().display());
                affects_index |= event.affects_index();
            }

            let mut rebuild = build_config.clone();
            rebuild.index = build_config.index && affects_index;

            match build(rebuild).await {
                Ok(result) => tracing::info!(
                    "Rebuilt {} files in {}ms",
                    result.files_copied,
                    result.duration_ms
                ),
                Err(e) => tracing::error!("Rebuild failed: {:#}", e),
            }
        }
    });

    tracing::info!("Watching {} for changes", config.root.display());

    GalleryServer::new(config.server_config(port, open))
        .start()
        .await?;

    Ok(())
}
