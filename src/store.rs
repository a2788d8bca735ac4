//! Persistence sinks for planner state.
//!
//! The planner writes one JSON blob under one key. Anything that can hold a
//! string per key works: the in-memory store (shared between planners in one
//! process, the way browser tabs share local storage) or a directory of JSON
//! files with atomic replacement.
//!
//! `StoreWatcher` reports when another process rewrites a `FileStore` file so
//! the host can run cross-tab validation.

use crate::constants::APP_DIR_NAME;
use crate::error::{PlannerError, PlannerResult};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Key-value persistence sink.
pub trait StateStore: Send {
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PlannerResult<()>;
    fn remove(&self, key: &str) -> PlannerResult<()>;
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PlannerResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> PlannerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    /// `<data_dir>/wallplanner`, falling back to the home directory.
    pub fn default_dir() -> PlannerResult<PathBuf> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| PlannerError::Store("Could not determine user data directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key);
        // Write next to the target then rename over it
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), bytes = value.len(), "State written");
        Ok(())
    }

    fn remove(&self, key: &str) -> PlannerResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Store Watcher
// ============================================================================

/// External change to a watched state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

/// Watches one key of a `FileStore` for changes made by other processes.
pub struct StoreWatcher {
    // Dropping the watcher stops delivery
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<notify::Event>>,
    file_name: OsString,
}

impl StoreWatcher {
    pub fn new(store: &FileStore, key: &str) -> PlannerResult<Self> {
        let path = store.path_for(key);
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| PlannerError::Store(format!("Invalid state path {}", path.display())))?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        // Atomic writes replace the file, so watch the directory
        watcher.watch(store.dir(), RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching state file");

        Ok(Self {
            _watcher: watcher,
            rx,
            file_name,
        })
    }

    fn classify(&self, result: notify::Result<notify::Event>) -> Option<StoreEvent> {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "State watcher error");
                return Some(StoreEvent::Error(e.to_string()));
            }
        };
        let ours = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()));
        if !ours {
            return None;
        }
        match event.kind {
            EventKind::Create(_) => Some(StoreEvent::Created),
            EventKind::Modify(_) => Some(StoreEvent::Modified),
            EventKind::Remove(_) => Some(StoreEvent::Deleted),
            _ => None,
        }
    }

    /// Next pending change, without blocking.
    pub fn poll(&self) -> Option<StoreEvent> {
        while let Ok(result) = self.rx.try_recv() {
            if let Some(event) = self.classify(result) {
                return Some(event);
            }
        }
        None
    }

    /// Block up to `timeout` for the next change.
    pub fn wait(&self, timeout: Duration) -> Option<StoreEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(result) => {
                    if let Some(event) = self.classify(result) {
                        return Some(event);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }
}
