//! Static asset server command.

use anyhow::Result;
use gallery_server::GalleryServer;

use crate::config::Config;

/// Run the serve command.
pub async fn run(config: &Config, port: Option<u16>, open: bool) -> Result<()> {
    let public = config.public_dir();
    if !public.exists() {
        tracing::warn!(
            "Public directory not found: {}. Run 'gallery build' first.",
            public.display()
        );
    }

    GalleryServer::new(config.server_config(port, open))
        .start()
        .await?;

    Ok(())
}
