//! File watching for rebuilds during development.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use crate::server::ServerError;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A project's `index.html` was modified
    PageModified(PathBuf),

    /// Any other file was modified
    AssetModified(PathBuf),

    /// File or directory was created
    Created(PathBuf),

    /// File or directory was deleted
    Deleted(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::PageModified(p) | Self::AssetModified(p) | Self::Created(p) | Self::Deleted(p) => p,
        }
    }

    /// Whether the project index may be stale after this event.
    pub fn affects_index(&self) -> bool {
        !matches!(self, Self::AssetModified(_))
    }
}

/// File watcher for detecting changes in source trees.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch the given paths recursively. Paths that do not exist are skipped.
    ///
    /// Returns the watcher and a channel to receive events. Events stop when
    /// the watcher is dropped.
    pub fn new(paths: &[PathBuf]) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), ServerError> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

        for path in paths {
            if !path.exists() {
                tracing::debug!("Not watching missing path {}", path.display());
                continue;
            }
            watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(|e| ServerError::WatchError(format!("{}: {}", path.display(), e)))?;
        }

        std::thread::spawn(move || {
            let debounce = Duration::from_millis(100);
            let mut pending: Vec<WatchEvent> = Vec::new();

            // Flush once the source has been quiet for the debounce window,
            // so the last change in a burst is always delivered.
            loop {
                match sync_rx.recv_timeout(debounce) {
                    Ok(event) => {
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind) {
                                merge_pending(&mut pending, e);
                            }
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        for e in pending.drain(..) {
                            if async_tx.blocking_send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        for e in pending.drain(..) {
                            let _ = async_tx.blocking_send(e);
                        }
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Add `event` to a pending batch, one event per path.
///
/// A later event replaces an earlier one for the same path, unless that
/// would hide a change to the project index.
fn merge_pending(pending: &mut Vec<WatchEvent>, event: WatchEvent) {
    match pending.iter_mut().find(|e| e.path() == event.path()) {
        Some(existing) => {
            if event.affects_index() || !existing.affects_index() {
                *existing = event;
            }
        }
        None => pending.push(event),
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &EventKind) -> Option<WatchEvent> {
    let is_page = path.file_name().and_then(|n| n.to_str()) == Some("index.html");

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) if is_page => Some(WatchEvent::PageModified(path.to_path_buf())),
        EventKind::Modify(_) => Some(WatchEvent::AssetModified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_events() {
        let page = Path::new("challenges/fractals/tree/index.html");
        let script = Path::new("challenges/fractals/tree/script.js");

        assert_eq!(
            classify_event(page, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::PageModified(page.to_path_buf()))
        );
        assert_eq!(
            classify_event(script, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::AssetModified(script.to_path_buf()))
        );
        assert_eq!(
            classify_event(script, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(script.to_path_buf()))
        );
        assert_eq!(
            classify_event(script, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Deleted(script.to_path_buf()))
        );
        assert_eq!(classify_event(script, &EventKind::Access(AccessKind::Any)), None);
    }

    #[test]
    fn only_asset_changes_leave_index_fresh() {
        let path = PathBuf::from("a");
        assert!(!WatchEvent::AssetModified(path.clone()).affects_index());
        assert!(WatchEvent::PageModified(path.clone()).affects_index());
        assert!(WatchEvent::Deleted(path).affects_index());
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("fractals/tree");
        fs::create_dir_all(&project).unwrap();

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(project.join("index.html"), "<title>Tree</title>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }

    #[test]
    fn merges_pending_events_by_path() {
        let page = PathBuf::from("other/slide/index.html");
        let script = PathBuf::from("other/slide/script.js");
        let mut pending = Vec::new();

        merge_pending(&mut pending, WatchEvent::Created(script.clone()));
        merge_pending(&mut pending, WatchEvent::AssetModified(script.clone()));
        merge_pending(&mut pending, WatchEvent::AssetModified(page.clone()));
        merge_pending(&mut pending, WatchEvent::PageModified(page.clone()));

        assert_eq!(
            pending,
            vec![WatchEvent::Created(script), WatchEvent::PageModified(page)]
        );
    }

    #[tokio::test]
    async fn delivers_last_change_in_a_burst() {
        let temp = tempdir().unwrap();
        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        for i in 0..4 {
            fs::write(temp.path().join(format!("f{}.js", i)), "x").unwrap();
            tokio::time::sleep(Duration::from_millis(60)).await;
        }

        let last = tokio::time::timeout(Duration::from_secs(3), async {
            while let Some(event) = rx.recv().await {
                if event.path().file_name().and_then(|n| n.to_str()) == Some("f3.js") {
                    return true;
                }
            }
            false
        })
        .await;
        drop(watcher);

        assert_eq!(last.ok(), Some(true), "f3.js was never delivered");
    }

    #[test]
    fn skips_missing_paths() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("other");

        assert!(FileWatcher::new(&[missing]).is_ok());
    }
}
