use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::input::Source;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("cannot watch stdin; pass input files to use --watch")]
    Stdin,

    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// The files behind `sources`; stdin cannot be watched.
pub fn watch_targets(sources: &[Source]) -> Result<Vec<PathBuf>, WatchError> {
    sources
        .iter()
        .map(|s| s.path().map(PathBuf::from).ok_or(WatchError::Stdin))
        .collect()
}

/// Blocks until one of the watched files is written, coalescing bursts of
/// events that arrive within the debounce window.
pub struct ChangeWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    debounce: Duration,
}

impl ChangeWatcher {
    pub fn new(paths: &[PathBuf], debounce: Duration) -> Result<Self, WatchError> {
        let (tx, events) = channel();
        let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())?;
        for path in paths {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }
        Ok(Self {
            _watcher: watcher,
            events,
            debounce,
        })
    }

    /// The path that changed, or `None` once the watcher has shut down.
    pub fn next_change(&self) -> Result<Option<PathBuf>, WatchError> {
        next_change(&self.events, self.debounce)
    }
}

fn next_change(
    events: &Receiver<notify::Result<Event>>,
    debounce: Duration,
) -> Result<Option<PathBuf>, WatchError> {
    loop {
        let Ok(event) = events.recv() else {
            return Ok(None);
        };
        let event = event?;
        if !is_content_change(&event.kind) {
            continue;
        }
        drain_burst(events, debounce)?;
        return Ok(event.paths.into_iter().next());
    }
}

fn drain_burst(
    events: &Receiver<notify::Result<Event>>,
    debounce: Duration,
) -> Result<(), WatchError> {
    let deadline = Instant::now() + debounce;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match events.recv_timeout(remaining) {
            Ok(event) => {
                event?;
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}
