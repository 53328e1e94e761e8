//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Content YAML was modified
    ContentModified(PathBuf),

    /// A template override was modified
    TemplateModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification (public assets)
    Modified(PathBuf),
}

/// Quiet period that ends a burst of events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Longest a burst may hold events back when changes never settle.
const MAX_DELAY: Duration = Duration::from_secs(1);

/// Trailing-edge debounce buffer.
///
/// Editors emit bursts of events for one save (swap file, then the real
/// write). Every distinct event in a burst is kept and released together
/// once the burst settles.
#[derive(Debug, Default)]
struct Debouncer {
    pending: Vec<WatchEvent>,
    burst_start: Option<Instant>,
}

impl Debouncer {
    fn push(&mut self, event: WatchEvent, now: Instant) {
        self.burst_start.get_or_insert(now);
        if !self.pending.contains(&event) {
            self.pending.push(event);
        }
    }

    fn overdue(&self, now: Instant) -> bool {
        self.burst_start
            .is_some_and(|start| now.duration_since(start) >= MAX_DELAY)
    }

    fn take(&mut self) -> Vec<WatchEvent> {
        self.burst_start = None;
        std::mem::take(&mut self.pending)
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Paths that do not exist are skipped. Returns the watcher and a channel
    /// to receive events; events stop when the watcher is dropped.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
                tracing::debug!("Watching {}", path.display());
            }
        }

        std::thread::spawn(move || {
            let mut debouncer = Debouncer::default();

            loop {
                match sync_rx.recv_timeout(DEBOUNCE) {
                    Ok(event) => {
                        let now = Instant::now();
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind) {
                                debouncer.push(e, now);
                            }
                        }
                        if !debouncer.overdue(now) {
                            continue;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => return,
                }

                for e in debouncer.take() {
                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Whether `path` is a content file.
pub(crate) fn is_content_file(path: &Path) -> bool {
    matches!(extension(path), "yaml" | "yml")
}

/// Whether `path` is a template override.
pub(crate) fn is_template_file(path: &Path) -> bool {
    matches!(extension(path), "html" | "jinja" | "j2")
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) if is_content_file(path) => {
            Some(WatchEvent::ContentModified(path.to_path_buf()))
        }
        EventKind::Modify(_) if is_template_file(path) => {
            Some(WatchEvent::TemplateModified(path.to_path_buf()))
        }
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
    use notify::EventKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_by_kind_and_extension() {
        let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));

        assert_eq!(
            classify_event(Path::new("content/portfolio.yaml"), &modify),
            Some(WatchEvent::ContentModified(PathBuf::from("content/portfolio.yaml")))
        );
        assert_eq!(
            classify_event(Path::new("templates/page.html"), &modify),
            Some(WatchEvent::TemplateModified(PathBuf::from("templates/page.html")))
        );
        assert_eq!(
            classify_event(Path::new("public/profile.jpg"), &modify),
            Some(WatchEvent::Modified(PathBuf::from("public/profile.jpg")))
        );
        assert_eq!(
            classify_event(Path::new("a.yaml"), &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(PathBuf::from("a.yaml")))
        );
        assert_eq!(
            classify_event(Path::new("a.yaml"), &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Deleted(PathBuf::from("a.yaml")))
        );
        assert_eq!(classify_event(Path::new("a.yaml"), &EventKind::Any), None);
    }

    #[test]
    fn debouncer_keeps_every_event_of_a_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(WatchEvent::Created(PathBuf::from(".portfolio.yaml.swp")), start);
        debouncer.push(
            WatchEvent::ContentModified(PathBuf::from("portfolio.yaml")),
            start + Duration::from_millis(20),
        );
        debouncer.push(
            WatchEvent::ContentModified(PathBuf::from("portfolio.yaml")),
            start + Duration::from_millis(30),
        );

        assert!(!debouncer.overdue(start + Duration::from_millis(30)));
        assert_eq!(
            debouncer.take(),
            vec![
                WatchEvent::Created(PathBuf::from(".portfolio.yaml.swp")),
                WatchEvent::ContentModified(PathBuf::from("portfolio.yaml")),
            ]
        );
        assert!(debouncer.take().is_empty());
    }

    #[test]
    fn debouncer_flushes_endless_bursts() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(WatchEvent::Modified(PathBuf::from("a.css")), start);

        assert!(!debouncer.overdue(start + Duration::from_millis(500)));
        assert!(debouncer.overdue(start + MAX_DELAY));
    }

    #[tokio::test]
    async fn content_write_after_swap_file_is_delivered() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("portfolio.yaml");
        fs::write(&content, "site: {}").unwrap();

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join(".portfolio.yaml.swp"), "swap").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        fs::write(&content, "site: { title: saved }").unwrap();

        let saw_content = tokio::time::timeout(Duration::from_secs(3), async {
            while let Some(event) = rx.recv().await {
                if matches!(&event, WatchEvent::ContentModified(p) if p.ends_with("portfolio.yaml"))
                {
                    return true;
                }
            }
            false
        })
        .await;

        drop(watcher);

        assert!(matches!(saw_content, Ok(true)), "content write was dropped");
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("portfolio.yaml");

        // Create the watcher first (so it catches file creation)
        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "site: {}").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
