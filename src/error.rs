//! Engine error taxonomy.
//!
//! Every variant here is recovered at the boundary where it occurs; none may
//! escape the action-processing loop. Affordability rejections and empty
//! leaderboards are the only user-visible failures; persistence problems
//! degrade silently to local-only play.

use crate::ledger::CurrencyKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A purchase or boost activation the player cannot afford.
    /// The balance is left unchanged.
    #[error("insufficient {kind}: need {required:.2}, have {available:.2}")]
    InsufficientFunds {
        kind: CurrencyKind,
        required: f64,
        available: f64,
    },

    /// A click arrived with no energy left. Rejected as a no-op.
    #[error("out of energy")]
    OutOfEnergy,

    /// An upgrade key in a stored snapshot that no current upgrade matches.
    /// The entry is skipped on load; the rest of the snapshot is kept.
    #[error("unknown upgrade id: {0}")]
    InvalidUpgradeId(String),

    /// Remote store I/O failed. Local cache is used instead.
    #[error("remote store unavailable: {0}")]
    PersistenceUnavailable(String),

    /// A cached snapshot that could not be parsed or contained values
    /// outside the schema's domain. Defaults are substituted.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Leaderboard fetch failed. Callers treat this as an empty board.
    #[error("leaderboard unavailable: {0}")]
    LeaderboardUnavailable(String),
}
