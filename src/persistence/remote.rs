//! Remote snapshot store.
//!
//! The remote side of the dual-persistence scheme. It is advisory state:
//! fetches and pushes are best-effort, and every failure is recoverable by
//! falling back to the local cache. The HTTP contract is a plain
//! GET/PUT-by-player-id with idempotent upsert semantics.

use super::snapshot::Snapshot;
use crate::core::constants::{HTTP_USER_AGENT, REMOTE_TIMEOUT_SECONDS};
use crate::error::EngineError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

/// Storage for snapshots somewhere that survives the local machine.
pub trait RemoteStore {
    /// Fetch the snapshot for a player. `Ok(None)` means the store is
    /// reachable but has never seen this player.
    fn fetch(&self, player_id: &str) -> Result<Option<Snapshot>, EngineError>;

    /// Upsert a snapshot. Idempotent; callers may push arbitrarily often.
    fn push(&self, snapshot: &Snapshot) -> Result<(), EngineError>;
}

/// HTTP-backed store speaking the GET/PUT snapshot contract.
pub struct HttpRemoteStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECONDS))
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn snapshot_url(&self, player_id: &str) -> String {
        format!("{}/players/{}/snapshot", self.base_url, player_id)
    }
}

impl RemoteStore for HttpRemoteStore {
    fn fetch(&self, player_id: &str) -> Result<Option<Snapshot>, EngineError> {
        let url = self.snapshot_url(player_id);
        match self.agent.get(&url).set("User-Agent", HTTP_USER_AGENT).call() {
            Ok(response) => {
                let snapshot: Snapshot = response
                    .into_json()
                    .map_err(|e| EngineError::MalformedSnapshot(e.to_string()))?;
                Ok(Some(snapshot))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(EngineError::PersistenceUnavailable(err.to_string())),
        }
    }

    fn push(&self, snapshot: &Snapshot) -> Result<(), EngineError> {
        let url = self.snapshot_url(&snapshot.player_id);
        self.agent
            .put(&url)
            .set("User-Agent", HTTP_USER_AGENT)
            .send_json(snapshot)
            .map(|_| ())
            .map_err(|err| EngineError::PersistenceUnavailable(err.to_string()))
    }
}

/// In-memory store for tests, the simulator, and offline play.
///
/// Can be flipped unreachable to exercise the degradation paths.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    snapshots: RefCell<HashMap<String, Snapshot>>,
    unreachable: Cell<bool>,
    push_count: Cell<u64>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network partition.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.set(unreachable);
    }

    /// Seed a snapshot, as if another device had pushed it.
    pub fn insert(&self, snapshot: Snapshot) {
        self.snapshots
            .borrow_mut()
            .insert(snapshot.player_id.clone(), snapshot);
    }

    /// Peek at the stored snapshot for a player.
    pub fn get(&self, player_id: &str) -> Option<Snapshot> {
        self.snapshots.borrow().get(player_id).cloned()
    }

    /// How many pushes have been accepted.
    pub fn push_count(&self) -> u64 {
        self.push_count.get()
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn fetch(&self, player_id: &str) -> Result<Option<Snapshot>, EngineError> {
        if self.unreachable.get() {
            return Err(EngineError::PersistenceUnavailable(
                "memory store unreachable".to_string(),
            ));
        }
        Ok(self.snapshots.borrow().get(player_id).cloned())
    }

    fn push(&self, snapshot: &Snapshot) -> Result<(), EngineError> {
        if self.unreachable.get() {
            return Err(EngineError::PersistenceUnavailable(
                "memory store unreachable".to_string(),
            ));
        }
        self.push_count.set(self.push_count.get() + 1);
        self.insert(snapshot.clone());
        Ok(())
    }
}
