//! Dual-persistence reconciliation.
//!
//! The gateway owns the local cache and the remote store and applies one
//! policy: on load, the snapshot with the later `save_time` wins; on save,
//! local is written synchronously and the remote push is best-effort.
//! Remote failures never surface past this module; they are logged and
//! play degrades to local-only.

use super::local::LocalCache;
use super::remote::RemoteStore;
use super::snapshot::Snapshot;
use tracing::{debug, warn};

pub struct PersistenceGateway {
    local: LocalCache,
    remote: Box<dyn RemoteStore>,
}

impl PersistenceGateway {
    pub fn new(local: LocalCache, remote: Box<dyn RemoteStore>) -> Self {
        Self { local, remote }
    }

    /// Load the freshest snapshot for a player.
    ///
    /// Remote and local are consulted independently; when both exist, the
    /// later `save_time` wins. An unreachable remote or malformed cache is
    /// silent. `None` only when neither side has anything, in which case
    /// the caller starts from defaults.
    pub fn load(&self, player_id: &str) -> Option<Snapshot> {
        let remote = match self.remote.fetch(player_id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "remote fetch failed, using local cache");
                None
            }
        };
        let local = self.local.read(player_id);

        match (remote, local) {
            (Some(remote), Some(local)) => {
                if remote.save_time >= local.save_time {
                    debug!(
                        remote = remote.save_time,
                        local = local.save_time,
                        "reconciled in favor of remote snapshot"
                    );
                    Some(remote)
                } else {
                    debug!(
                        remote = remote.save_time,
                        local = local.save_time,
                        "reconciled in favor of local snapshot"
                    );
                    Some(local)
                }
            }
            (Some(remote), None) => Some(remote),
            (None, Some(local)) => Some(local),
            (None, None) => None,
        }
    }

    /// Persist a snapshot: local first, synchronously, then a best-effort
    /// remote push. Neither failure is surfaced; both are safe to repeat.
    pub fn save(&self, snapshot: &Snapshot) {
        if let Err(err) = self.local.write(snapshot) {
            warn!(%err, "failed to write local snapshot cache");
        }
        if let Err(err) = self.remote.push(snapshot) {
            warn!(%err, "remote push failed, snapshot kept locally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::remote::MemoryRemoteStore;
    use std::rc::Rc;

    struct SharedRemote(Rc<MemoryRemoteStore>);

    impl RemoteStore for SharedRemote {
        fn fetch(&self, player_id: &str) -> Result<Option<Snapshot>, crate::error::EngineError> {
            self.0.fetch(player_id)
        }
        fn push(&self, snapshot: &Snapshot) -> Result<(), crate::error::EngineError> {
            self.0.push(snapshot)
        }
    }

    fn gateway_with(
        dir: &tempfile::TempDir,
        remote: Rc<MemoryRemoteStore>,
    ) -> PersistenceGateway {
        let local = LocalCache::with_dir(dir.path().to_path_buf()).unwrap();
        PersistenceGateway::new(local, Box::new(SharedRemote(remote)))
    }

    fn snapshot_for(player_id: &str, save_time: i64) -> Snapshot {
        Snapshot {
            player_id: player_id.to_string(),
            save_time,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_later_remote_snapshot_wins() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Rc::new(MemoryRemoteStore::new());
        let gateway = gateway_with(&dir, remote.clone());

        let mut local_snap = snapshot_for("p1", 100);
        local_snap.tier_rank = 1;
        gateway.local.write(&local_snap).unwrap();

        let mut remote_snap = snapshot_for("p1", 200);
        remote_snap.tier_rank = 5;
        remote.insert(remote_snap);

        let loaded = gateway.load("p1").unwrap();
        assert_eq!(loaded.save_time, 200);
        assert_eq!(loaded.tier_rank, 5);
    }

    #[test]
    fn test_later_local_snapshot_wins() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Rc::new(MemoryRemoteStore::new());
        let gateway = gateway_with(&dir, remote.clone());

        gateway.local.write(&snapshot_for("p1", 300)).unwrap();
        remote.insert(snapshot_for("p1", 200));

        assert_eq!(gateway.load("p1").unwrap().save_time, 300);
    }

    #[test]
    fn test_unreachable_remote_falls_back_to_local_silently() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Rc::new(MemoryRemoteStore::new());
        let gateway = gateway_with(&dir, remote.clone());

        gateway.local.write(&snapshot_for("p1", 50)).unwrap();
        remote.set_unreachable(true);

        assert_eq!(gateway.load("p1").unwrap().save_time, 50);
    }

    #[test]
    fn test_nothing_anywhere_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = gateway_with(&dir, Rc::new(MemoryRemoteStore::new()));
        assert!(gateway.load("ghost").is_none());
    }

    #[test]
    fn test_save_writes_local_even_when_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Rc::new(MemoryRemoteStore::new());
        let gateway = gateway_with(&dir, remote.clone());
        remote.set_unreachable(true);

        gateway.save(&snapshot_for("p1", 77));

        assert_eq!(gateway.local.read("p1").unwrap().save_time, 77);
        assert!(remote.get("p1").is_none());

        // Remote recovers; the next save reaches both sides.
        remote.set_unreachable(false);
        gateway.save(&snapshot_for("p1", 78));
        assert_eq!(remote.get("p1").unwrap().save_time, 78);
    }
}
