//! Dual persistence: versioned snapshots, local cache, remote store, and
//! the reconciliation gateway between them.

mod gateway;
mod local;
mod remote;
mod snapshot;

pub use gateway::PersistenceGateway;
pub use local::LocalCache;
pub use remote::{HttpRemoteStore, MemoryRemoteStore, RemoteStore};
pub use snapshot::{AchievementEntry, BoostEntry, MetricsEntry, Snapshot, SNAPSHOT_VERSION};
