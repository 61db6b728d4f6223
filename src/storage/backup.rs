//! Snapshot-before-write backups with retention pruning.
//!
//! Backups of `ReligiJakarta.ttl` are named
//! `ReligiJakarta_backup_YYYYMMDD_HHMMSS.ttl`. The fixed-width timestamp
//! makes name order chronological, which is what pruning relies on.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::{Error, Result};

/// Number of snapshots kept per file unless configured otherwise.
pub const DEFAULT_RETENTION: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Copies a file into a backup directory and prunes old copies.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
    retention: usize,
}

impl BackupManager {
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention: retention.max(1),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Snapshot `source` using the current local time.
    ///
    /// Returns the backup path, or `None` when `source` does not exist yet.
    pub fn snapshot(&self, source: &Path) -> Result<Option<PathBuf>> {
        self.snapshot_at(source, Local::now())
    }

    /// Snapshot `source` as if taken at `now`.
    pub fn snapshot_at(&self, source: &Path, now: DateTime<Local>) -> Result<Option<PathBuf>> {
        if !source.is_file() {
            tracing::debug!("Nothing to back up at {}", source.display());
            return Ok(None);
        }

        fs::create_dir_all(&self.dir).map_err(|e| Error::persistence(&self.dir, e))?;

        let naming = BackupName::of(source);
        let target = self.free_name(&naming, &now.format(TIMESTAMP_FORMAT).to_string());
        fs::copy(source, &target).map_err(|e| Error::persistence(&target, e))?;
        tracing::info!("Backed up {} to {}", source.display(), target.display());

        self.prune(&naming);
        Ok(Some(target))
    }

    /// Existing backups of `source`, oldest first.
    pub fn list(&self, source: &Path) -> Result<Vec<PathBuf>> {
        self.list_named(&BackupName::of(source))
    }

    fn list_named(&self, naming: &BackupName) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if naming.matches(&name.to_string_lossy()) && entry.path().is_file() {
                backups.push(entry.path());
            }
        }
        backups.sort();
        Ok(backups)
    }

    /// First unused name for `timestamp`; same-second snapshots get `_01`, `_02`, ...
    fn free_name(&self, naming: &BackupName, timestamp: &str) -> PathBuf {
        let mut candidate = self.dir.join(naming.file_name(timestamp));
        let mut counter = 1;
        while candidate.exists() {
            candidate = self
                .dir
                .join(naming.file_name(&format!("{}_{:02}", timestamp, counter)));
            counter += 1;
        }
        candidate
    }

    /// Delete the oldest backups beyond the retention limit.
    fn prune(&self, naming: &BackupName) {
        let backups = match self.list_named(naming) {
            Ok(backups) => backups,
            Err(e) => {
                tracing::warn!("Could not list backups in {}: {}", self.dir.display(), e);
                return;
            }
        };

        let excess = backups.len().saturating_sub(self.retention);
        for old in &backups[..excess] {
            match fs::remove_file(old) {
                Ok(()) => tracing::debug!("Pruned backup {}", old.display()),
                Err(e) => tracing::warn!("Failed to remove old backup {}: {}", old.display(), e),
            }
        }
    }
}

/// `<stem>_backup_` prefix and `.<ext>` suffix derived from the source file.
struct BackupName {
    prefix: String,
    suffix: String,
}

impl BackupName {
    fn of(source: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "graph".to_string());
        let suffix = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self {
            prefix: format!("{}_backup_", stem),
            suffix,
        }
    }

    fn file_name(&self, timestamp: &str) -> String {
        format!("{}{}{}", self.prefix, timestamp, self.suffix)
    }

    fn matches(&self, name: &str) -> bool {
        name.len() > self.prefix.len() + self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }
}
