//! Save/load of the progression snapshot
//!
//! Features:
//! - Versioned JSON envelope
//! - Backup rotation (tmp → save, old save → backup)
//! - Validation of restored values

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progression::ProgressSnapshot;

/// Envelope version written by this build
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {0} (expected {expected})", expected = SAVE_VERSION)]
    UnsupportedVersion(u32),
    #[error("save data rejected: {0}")]
    InvalidSnapshot(&'static str),
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    snapshot: ProgressSnapshot,
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(extension);
    PathBuf::from(name)
}

/// Path the previous save is moved to
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

/// A save or its backup exists
pub fn has_save(path: &Path) -> bool {
    path.is_file() || backup_path(path).is_file()
}

fn validate(snapshot: &ProgressSnapshot) -> Result<(), PersistError> {
    if snapshot.current_level == 0 {
        return Err(PersistError::InvalidSnapshot("level must be at least 1"));
    }
    let stats_ok = [snapshot.rabbit_speed, snapshot.jump_height]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
    if !stats_ok {
        return Err(PersistError::InvalidSnapshot("speed and jump must be finite and non-negative"));
    }
    Ok(())
}

/// Write `snapshot` to `path`, keeping the previous save as a backup
pub fn save(path: &Path, snapshot: &ProgressSnapshot) -> Result<(), PersistError> {
    validate(snapshot)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        snapshot: *snapshot,
    };
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(&envelope)?)?;

    if path.exists() {
        fs::rename(path, backup_path(path))?;
    }
    fs::rename(&tmp, path)?;

    log::info!("Saved progress (level {}) to {}", snapshot.current_level, path.display());
    Ok(())
}

/// Read a snapshot back, falling back to the backup if the save itself is
/// missing. `Ok(None)` when there is neither.
pub fn load(path: &Path) -> Result<Option<ProgressSnapshot>, PersistError> {
    if let Some(snapshot) = read_snapshot(path)? {
        log::info!("Loaded progress: level {}", snapshot.current_level);
        return Ok(Some(snapshot));
    }

    let backup = backup_path(path);
    let recovered = read_snapshot(&backup)?;
    if let Some(snapshot) = &recovered {
        log::warn!(
            "Save {} missing, recovered level {} from {}",
            path.display(),
            snapshot.current_level,
            backup.display()
        );
    }
    Ok(recovered)
}

fn read_snapshot(path: &Path) -> Result<Option<ProgressSnapshot>, PersistError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let envelope: SaveEnvelope = serde_json::from_slice(&data)?;
    if envelope.version != SAVE_VERSION {
        return Err(PersistError::UnsupportedVersion(envelope.version));
    }
    validate(&envelope.snapshot)?;
    Ok(Some(envelope.snapshot))
}
