//! The full mutable state of one player's session.
//!
//! One [`GameState`] is exclusively owned by one engine instance. The
//! persistence layer holds serialized snapshots of it, never a live
//! reference.

use crate::achievements::Achievements;
use crate::boosts::BoostScheduler;
use crate::core::constants::INITIAL_COINS;
use crate::ledger::{CurrencyKind, ResourceLedger};
use crate::progression::TierState;
use crate::stats;
use crate::upgrades::UpgradeId;
use std::collections::HashMap;
use uuid::Uuid;

/// Who is playing. Created on first load, never destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub player_id: String,
    pub display_name: String,
}

impl PlayerProfile {
    /// New profile with a generated id.
    pub fn new(display_name: String) -> Self {
        Self {
            player_id: Uuid::new_v4().to_string(),
            display_name,
        }
    }

    /// Profile for an externally supplied id (host-provided identity).
    pub fn with_id(player_id: String, display_name: String) -> Self {
        Self {
            player_id,
            display_name,
        }
    }
}

/// Lifetime counters that feed achievements and the leaderboard.
/// All monotone non-decreasing; they survive ascension.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LifetimeMetrics {
    pub total_clicks: u64,
    pub total_crits: u64,
    pub upgrades_purchased: u64,
    pub boosts_activated: u64,
    pub highest_tier: u32,
}

/// Main game state containing all player progress.
#[derive(Debug, Clone)]
pub struct GameState {
    pub profile: PlayerProfile,
    pub ledger: ResourceLedger,
    pub upgrades: HashMap<UpgradeId, u32>,
    pub boosts: BoostScheduler,
    pub tier: TierState,
    /// Current energy. Capacity and regeneration are derived from upgrades.
    pub energy: f64,
    pub ascension_count: u32,
    /// Lifetime coins at the moment of the last ascension; the delta to the
    /// current lifetime total determines the next ascension's reward.
    pub coins_at_last_ascension: f64,
    pub metrics: LifetimeMetrics,
    pub achievements: Achievements,
}

impl GameState {
    /// Creates a fresh state for a profile with starting balances.
    pub fn new(profile: PlayerProfile) -> Self {
        let mut ledger = ResourceLedger::new();
        ledger.credit(CurrencyKind::Coins, INITIAL_COINS);

        let mut state = Self {
            profile,
            ledger,
            upgrades: HashMap::new(),
            boosts: BoostScheduler::new(),
            tier: TierState::default(),
            energy: 0.0,
            ascension_count: 0,
            coins_at_last_ascension: 0.0,
            metrics: LifetimeMetrics::default(),
            achievements: Achievements::default(),
        };
        state.energy = stats::energy_capacity(&state);
        state
    }

    /// Owned level for an upgrade, 0 if never purchased.
    pub fn upgrade_level(&self, id: UpgradeId) -> u32 {
        self.upgrades.get(&id).copied().unwrap_or(0)
    }

    /// Coins earned since the last ascension (lifetime delta).
    pub fn coins_earned_since_ascension(&self) -> f64 {
        (self.ledger.lifetime_earned(CurrencyKind::Coins) - self.coins_at_last_ascension).max(0.0)
    }
}
