//! Streak state persistence with file locking.
//!
//! [`StreakData`] is the one piece of mutable state the system owns.
//! Saves are atomic (temp file + rename) and loads degrade to a fresh
//! default when the file is missing or corrupt, so a bad write can
//! never wedge the daily status check.

use crate::{Error, Result, StreakData};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl StreakData {
    /// Load streak state from a file with shared locking
    ///
    /// Missing, unreadable, or corrupt state degrades to the default
    /// with a warning rather than failing the caller.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No streak state file found, starting fresh");
            return Ok(Self::default());
        }

        let contents = match read_locked(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    "Unable to read streak state {:?}: {}. Starting fresh.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        match serde_json::from_str::<StreakData>(&contents) {
            Ok(data) => {
                tracing::debug!("Loaded streak state from {:?}", path);
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse streak state {:?}: {}. Starting fresh.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save streak state to a file with exclusive locking
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved streak state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut StreakData) -> Result<()>,
    {
        let mut data = Self::load(path)?;
        f(&mut data)?;
        data.save(path)?;
        Ok(data)
    }
}

/// Read a whole file under a shared lock
fn read_locked(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let result = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    result?;

    Ok(contents)
}
