//! Local snapshot cache.
//!
//! One JSON file per player under the platform config directory. The file
//! stem is a SHA-256 of the player id, so the cache key is deterministic
//! and filesystem-safe regardless of what the host uses as an identity.
//! A corrupt or missing file is never fatal; the caller falls back to the
//! remote snapshot or defaults.

use super::snapshot::Snapshot;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Filesystem-backed snapshot cache.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Cache under the platform config directory, creating it if needed.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "burrow").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;
        let dir = project_dirs.config_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Cache rooted at an explicit directory (tests, simulator).
    pub fn with_dir(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Deterministic cache path for a player id.
    pub fn path_for(&self, player_id: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(player_id.as_bytes());
        let digest = hasher.finalize();
        let stem: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.dir.join(format!("{stem}.json"))
    }

    /// Read the cached snapshot for a player.
    ///
    /// Returns `None` when the file is missing or unreadable, and also when
    /// it exists but fails to parse; a malformed cache degrades to
    /// defaults instead of halting the load.
    pub fn read(&self, player_id: &str) -> Option<Snapshot> {
        let path = self.path_for(player_id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(?path, %err, "failed to read local snapshot cache");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(?path, %err, "malformed local snapshot, substituting defaults");
                None
            }
        }
    }

    /// Write a snapshot synchronously. Idempotent upsert: the newest write
    /// for a player wins.
    pub fn write(&self, snapshot: &Snapshot) -> io::Result<()> {
        let path = self.path_for(&snapshot.player_id);
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}
