//! Durable layout persistence.
//!
//! The whole arrangement is one JSON blob in a versioned file under the
//! user's state directory. Nothing in here is allowed to fail observably:
//! an unreadable or malformed blob loads as "no saved layout", a failed
//! write is logged and dropped, and the in-memory state stays authoritative.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::layout::LayoutMap;

/// File name of the persisted blob. The `_v1` suffix is the schema version:
/// an incompatible format change bumps the suffix so stale blobs load as
/// absent instead of corrupting newer code.
pub const STORAGE_FILE: &str = "situation_monitor_layout_v1.json";

/// Quiet period of the trailing-edge save debounce.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
enum PersistError {
    #[error("layout io: {0}")]
    Io(#[from] io::Error),
    #[error("layout blob malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage seam for the layout blob.
///
/// None of the operations can fail observably; implementations log and
/// swallow their own errors.
pub trait LayoutStorage {
    fn load(&mut self) -> Option<LayoutMap>;
    fn save(&mut self, panels: &LayoutMap);
    fn clear(&mut self);
}

/// Resolve the per-user state directory for this application.
pub fn default_state_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("situation-monitor"))
}

/// File-backed storage under a state directory.
///
/// A `None` directory (no resolvable home, headless service account) means
/// permanent "no persistence": loads return absent and saves are no-ops.
pub struct FileStorage {
    path: Option<PathBuf>,
}

impl FileStorage {
    pub fn new(state_dir: Option<PathBuf>) -> Self {
        let dir = state_dir.or_else(default_state_dir);
        if dir.is_none() {
            tracing::warn!("no resolvable state directory; layout will not persist");
        }
        Self {
            path: dir.map(|dir| dir.join(STORAGE_FILE)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn try_load(path: &Path) -> Result<LayoutMap, PersistError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn try_save(path: &Path, panels: &LayoutMap) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string(panels)?;
        fs::write(path, encoded)?;
        Ok(())
    }
}

impl LayoutStorage for FileStorage {
    fn load(&mut self) -> Option<LayoutMap> {
        let path = self.path.as_deref()?;
        match Self::try_load(path) {
            Ok(panels) => Some(panels),
            Err(PersistError::Io(err)) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring saved layout");
                None
            }
        }
    }

    fn save(&mut self, panels: &LayoutMap) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(err) = Self::try_save(path, panels) {
            tracing::warn!(path = %path.display(), %err, "layout save failed");
        }
    }

    fn clear(&mut self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "layout clear failed")
            }
        }
    }
}

/// Trailing-edge debounce with at most one pending save.
///
/// Every [`DebouncedSave::schedule`] replaces the pending deadline, so only
/// the last call inside a quiet window survives; [`DebouncedSave::fire`] is
/// pumped from the event loop and consumes the deadline once it elapses.
/// The caller saves the state current at fire time, which is exactly the
/// "last state wins" contract.
#[derive(Debug, Default)]
pub struct DebouncedSave {
    deadline: Option<Instant>,
}

impl DebouncedSave {
    /// Arm (or re-arm) the deadline one quiet period from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + SAVE_DEBOUNCE);
    }

    /// Drop any pending save. An immediate write must call this so a stale
    /// debounced write cannot land after the authoritative one.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once the quiet period has elapsed; the pending save is consumed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
