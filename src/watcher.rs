//! File system watcher for watch mode

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Watches a directory for resume file changes and emits paths on a channel
pub struct ResumeWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    extensions: Vec<String>,
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl ResumeWatcher {
    /// Start watching the given path (file or directory) for files whose
    /// extension is one of `extensions` (with leading dot, e.g. ".pdf")
    pub fn watch(path: &Path, extensions: &[&str]) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
        } else if let Some(parent) = path.parent() {
            watcher.watch(parent, RecursiveMode::Recursive)?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        })
    }

    /// Check if the path looks like a resume we should analyze. Office lock
    /// files (`~$name.docx`) and hidden files are skipped.
    pub fn is_resume_file(p: &Path, extensions: &[&str]) -> bool {
        let name = match p.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => return false,
        };
        if name.starts_with("~$") || name.starts_with('.') {
            return false;
        }
        let lower = name.to_lowercase();
        extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }

    /// Collect resume paths from an event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        event
            .paths
            .iter()
            .filter(|p| Self::is_resume_file(p, &extensions))
            .cloned()
            .collect()
    }

    /// Wait for the next batch of changes (debounced). Blocks until at least
    /// one change, then drains for DEBOUNCE_MS. Output is sorted.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                log::warn!("Watch error: {}", e);
                return vec![];
            }
            Err(_) => return vec![],
        }

        // Editors often write a file in several steps
        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut paths: Vec<PathBuf> = all.into_iter().collect();
        paths.sort();
        paths
    }
}
