//! Static asset server for the challenge gallery.
//!
//! Serves the public directory, each challenge's page and the raw source
//! trees, plus a file watcher used by the dev loop to trigger rebuilds.

pub mod server;
pub mod watcher;

pub use server::{router, GalleryServer, ServerConfig, ServerError, MOUNTS};
pub use watcher::{FileWatcher, WatchEvent};
