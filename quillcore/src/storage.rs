//! Persistent storage for Quill.
//!
//! JSON files under the per-user config directory: the draft and the
//! editor preferences, each with its own file. Draft writes are coalesced
//! through [`Debounce`] so one write happens ~1 s after the last edit.
//! Failures are non-fatal; callers log and move on.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Config directory for Quill files.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("io", "quill", "quill")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load a JSON value from `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a JSON value to `path`, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Default trailing delay for draft writes.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Trailing-edge debounce: `mark_dirty()` on every change, `ready()` once
/// the delay has elapsed since the *last* change. The caller performs the
/// write and the debounce resets.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    dirty_since: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, dirty_since: None }
    }

    pub fn mark_dirty(&mut self) {
        self.mark_dirty_at(Instant::now());
    }

    pub fn mark_dirty_at(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    /// Whether a write is pending (dirty but not yet flushed).
    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// True exactly once per quiet period; resets on return.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.dirty_since = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debounce::new(Duration::from_millis(1000));
        assert!(!d.ready_at(t0));

        d.mark_dirty_at(t0);
        assert!(d.is_pending());
        assert!(!d.ready_at(t0 + Duration::from_millis(500)));
        assert!(d.ready_at(t0 + Duration::from_millis(1000)));
        // Flushed: not pending and not ready again.
        assert!(!d.is_pending());
        assert!(!d.ready_at(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_debounce_coalesces_edits() {
        let t0 = Instant::now();
        let mut d = Debounce::new(Duration::from_millis(1000));

        d.mark_dirty_at(t0);
        // A second edit inside the window restarts the timer.
        d.mark_dirty_at(t0 + Duration::from_millis(800));
        assert!(!d.ready_at(t0 + Duration::from_millis(1200)));
        assert!(d.ready_at(t0 + Duration::from_millis(1800)));
    }

    #[test]
    fn test_roundtrip_json() {
        let dir = std::env::temp_dir().join("quillcore-storage-test");
        let path = dir.join("value.json");
        save_json(&path, &vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = load_json(&path).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
        let _ = std::fs::remove_dir_all(dir);
    }
}
