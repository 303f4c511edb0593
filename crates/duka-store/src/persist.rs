//! # Snapshot Persistence
//!
//! Saves and loads the store snapshot as a single JSON file. Writes go
//! through a temp file followed by a rename so a crash mid-write never
//! leaves a truncated snapshot on disk.
//!
//! ## File Location
//! `default_snapshot_path()` resolves the platform data directory
//! (e.g. `~/.local/share/duka-pos/store.json` on Linux). Callers may
//! also supply an explicit path, which the tests do.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::snapshot::StoreSnapshot;

/// Errors from snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not resolve a platform data directory")]
    NoDataDir,
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Resolves the default snapshot path under the platform data dir.
pub fn default_snapshot_path() -> StoreResult<PathBuf> {
    let dirs = ProjectDirs::from("ke", "duka", "duka-pos").ok_or(StoreError::NoDataDir)?;
    Ok(dirs.data_dir().join("store.json"))
}

/// Writes the snapshot to `path`, creating parent directories as needed.
pub fn save_snapshot(snapshot: &StoreSnapshot, path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec_pretty(snapshot)?;

    // Temp-file-then-rename keeps the previous snapshot intact on crash.
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&json)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), bytes = json.len(), "snapshot saved");
    Ok(())
}

/// Loads a snapshot from `path`. Returns `Ok(None)` when no snapshot
/// exists yet (first run).
pub fn load_snapshot(path: &Path) -> StoreResult<Option<StoreSnapshot>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            // A corrupt snapshot should not brick the app; start fresh.
            warn!(path = %path.display(), error = %e, "snapshot unreadable, ignoring");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> StoreSnapshot {
        StoreSnapshot {
            products: vec![],
            sales: vec![],
            notifications: vec![],
            suppliers: vec![],
            pending_syncs: 0,
            shifts: vec![],
            current_shift: None,
            cart_tabs: vec![],
            active_tab_id: "tab-1".to_string(),
            cart: vec![],
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("duka-persist-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn default_path_points_at_the_store_file() {
        if let Ok(path) = default_snapshot_path() {
            assert_eq!(path.file_name().unwrap(), "store.json");
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let snap = empty_snapshot();
        save_snapshot(&snap, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.active_tab_id, "tab-1");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_loads_as_none() {
        let path = temp_path("missing-does-not-exist");
        assert!(load_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{ not json").unwrap();
        assert!(load_snapshot(&path).unwrap().is_none());
        fs::remove_file(&path).ok();
    }
}
