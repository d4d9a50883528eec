//! Burrow: an incremental clicker progression engine.
//!
//! The numeric core of a clicker game: a resource ledger, derived-stat
//! computation over compounding multipliers, timed boosts, tiered
//! progression with ascension resets, achievement tracking, and a
//! dual-persistence gateway that reconciles a local cache with a
//! best-effort remote store. Rendering, input, and host bootstrap live
//! outside; the engine exposes state queries and event streams only.

pub mod achievements;
pub mod boosts;
pub mod clock;
pub mod core;
pub mod error;
pub mod leaderboard;
pub mod ledger;
pub mod persistence;
pub mod progression;
pub mod stats;
pub mod upgrades;

pub use crate::core::engine::{ClickOutcome, GameEngine};
pub use crate::core::game_state::{GameState, PlayerProfile};
pub use crate::core::tick::{EngineEvent, TickResult};
pub use crate::error::EngineError;
pub use crate::stats::StatSnapshot;
