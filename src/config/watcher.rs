//! Bang definition file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::bang::Registry;
use crate::config::loader::{build_registry, load_bang_file};

/// A watcher that rebuilds the registry when the definition file changes.
pub struct RegistryWatcher {
    path: PathBuf,
    strict: bool,
    update_tx: mpsc::UnboundedSender<Registry>,
}

impl RegistryWatcher {
    /// Create a new RegistryWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt registries.
    pub fn new(path: &Path, strict: bool) -> (Self, mpsc::UnboundedReceiver<Registry>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (Self {
            path: path.to_path_buf(),
            strict,
            update_tx,
        }, update_rx)
    }

    /// Load and rebuild once. Failures are logged and yield `None`.
    fn reload(path: &Path, strict: bool) -> Option<Registry> {
        let file = match load_bang_file(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload bangs. Keeping current registry.");
                return None;
            }
        };

        match build_registry(file, strict) {
            Ok(registry) => Some(registry),
            Err(e) => {
                tracing::error!(error = %e, "Rejected reloaded bangs. Keeping current registry.");
                None
            }
        }
    }

    /// Start watching in a background thread.
    ///
    /// Watches the parent directory, not the file, so saves that replace the
    /// file (write to a temp file, then rename) keep triggering reloads.
    /// The returned handle must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let strict = self.strict;
        let dir = watch_dir(&self.path);

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if (event.kind.is_modify() || event.kind.is_create())
                        && touches(&event, &path)
                    {
                        tracing::info!(path = ?path, "Bang file change detected, reloading...");
                        if let Some(registry) = Self::reload(&path, strict) {
                            tracing::info!(bangs = registry.len(), "Bang registry rebuilt");
                            let _ = tx.send(registry);
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Bang file watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; a bare file name lives in the working directory.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether an event in the watched directory concerns the bang file.
///
/// Compares file names only: event paths may be absolute or canonicalized
/// while the configured path is relative.
fn touches(event: &Event, path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reload_keeps_nothing_on_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default = \"not a url\"").unwrap();
        assert!(RegistryWatcher::reload(file.path(), false).is_none());
    }

    const EMPTY: &str = "default = \"https://duckduckgo.com/?q={}\"\n";
    const WITH_G: &str = "default = \"https://duckduckgo.com/?q={}\"\n\n[[bangs]]\n\
        bang = \"g\"\nurl = \"https://www.google.com/search?q={}\"\n";
    const WITH_W: &str = "default = \"https://duckduckgo.com/?q={}\"\n\n[[bangs]]\n\
        bang = \"w\"\nurl = \"https://en.wikipedia.org/wiki/{}\"\n";

    async fn wait_for(
        updates: &mut mpsc::UnboundedReceiver<Registry>,
        token: &str,
    ) -> Registry {
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                match updates.recv().await {
                    Some(r) if r.lookup(token).is_some() => return r,
                    Some(_) => continue,
                    None => panic!("watcher channel closed"),
                }
            }
        })
        .await
        .expect("no reload within timeout")
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("bangs.toml")), PathBuf::from("."));
        assert_eq!(watch_dir(Path::new("conf/bangs.toml")), PathBuf::from("conf"));
    }

    #[test]
    fn test_touches_matches_file_name_only() {
        let event = Event::new(notify::EventKind::Any)
            .add_path(PathBuf::from("/srv/conf/bangs.toml"));
        assert!(touches(&event, Path::new("conf/bangs.toml")));
        assert!(!touches(&event, Path::new("conf/other.toml")));

        let unrelated = Event::new(notify::EventKind::Any)
            .add_path(PathBuf::from("/srv/conf/.bangs.toml.swp"));
        assert!(!touches(&unrelated, Path::new("conf/bangs.toml")));
    }

    #[tokio::test]
    async fn test_replace_by_rename_keeps_reloading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bangs.toml");
        std::fs::write(&path, EMPTY).unwrap();

        let (watcher, mut updates) = RegistryWatcher::new(&path, false);
        let _handle = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Save the way many editors do: new file, then rename over the old one.
        let tmp = dir.path().join("bangs.toml.tmp");
        std::fs::write(&tmp, WITH_G).unwrap();
        std::fs::rename(&tmp, &path).unwrap();
        let registry = wait_for(&mut updates, "g").await;
        assert_eq!(registry.len(), 1);

        // The replaced inode must not end the watch.
        std::fs::write(&path, WITH_W).unwrap();
        let registry = wait_for(&mut updates, "w").await;
        assert!(registry.lookup("g").is_none());
    }

    #[tokio::test]
    async fn test_change_sends_new_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bangs.toml");
        std::fs::write(&path, EMPTY).unwrap();

        let (watcher, mut updates) = RegistryWatcher::new(&path, false);
        let _handle = watcher.run().unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        std::fs::write(&path, WITH_G).unwrap();

        let registry = wait_for(&mut updates, "g").await;
        assert_eq!(registry.len(), 1);
    }
}
