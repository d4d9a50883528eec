//! Versioned snapshot schema.
//!
//! The snapshot is the only serialized form of player state. Every field
//! has an explicit default so a snapshot written by an older build (or a
//! remote store with missing fields) loads cleanly, with no nulls and no silent
//! coercion. Unknown map keys are skipped with a warning, never fatal.

use crate::achievements::AchievementId;
use crate::boosts::BoostKind;
use crate::core::game_state::{GameState, LifetimeMetrics, PlayerProfile};
use crate::error::EngineError;
use crate::ledger::CurrencyKind;
use crate::progression::TierState;
use crate::stats;
use crate::upgrades::UpgradeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current schema version. Bump on incompatible layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// An active boost as persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct BoostEntry {
    #[serde(default)]
    pub multiplier: f64,
    #[serde(default)]
    pub expires_at: i64,
}

/// One achievement's persisted state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct AchievementEntry {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub unlocked_at: Option<i64>,
}

/// Persisted lifetime counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct MetricsEntry {
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub total_crits: u64,
    #[serde(default)]
    pub upgrades_purchased: u64,
    #[serde(default)]
    pub boosts_activated: u64,
    #[serde(default)]
    pub highest_tier: u32,
}

/// The full serialized form of a player's progression.
///
/// String-keyed maps keep the schema open: an entry whose key no longer
/// parses is dropped on load instead of failing the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub balances: HashMap<String, f64>,
    #[serde(default)]
    pub lifetime_earned: HashMap<String, f64>,
    #[serde(default)]
    pub upgrades: HashMap<String, u32>,
    #[serde(default)]
    pub boosts: HashMap<String, BoostEntry>,
    #[serde(default)]
    pub tier_rank: u32,
    #[serde(default)]
    pub tier_progress: f64,
    #[serde(default)]
    pub ascension_count: u32,
    #[serde(default)]
    pub coins_at_last_ascension: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub metrics: MetricsEntry,
    #[serde(default)]
    pub achievements: HashMap<String, AchievementEntry>,
    /// Wall-clock marker used for local/remote reconciliation.
    #[serde(default)]
    pub save_time: i64,
}

impl Snapshot {
    /// Serialize the live state at a save instant.
    pub fn from_state(state: &GameState, save_time: i64) -> Self {
        let mut balances = HashMap::new();
        let mut lifetime_earned = HashMap::new();
        for kind in CurrencyKind::ALL {
            balances.insert(kind.key().to_string(), state.ledger.balance(kind));
            lifetime_earned.insert(kind.key().to_string(), state.ledger.lifetime_earned(kind));
        }

        let upgrades = state
            .upgrades
            .iter()
            .map(|(id, level)| (id.key().to_string(), *level))
            .collect();

        let boosts = state
            .boosts
            .iter_in_activation_order()
            .into_iter()
            .map(|(kind, boost)| {
                (
                    kind.key().to_string(),
                    BoostEntry {
                        multiplier: boost.multiplier,
                        expires_at: boost.expires_at,
                    },
                )
            })
            .collect();

        let achievements = state
            .achievements
            .iter_state()
            .map(|(id, progress, unlocked_at)| {
                (
                    id.key().to_string(),
                    AchievementEntry {
                        progress,
                        unlocked_at,
                    },
                )
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            player_id: state.profile.player_id.clone(),
            display_name: state.profile.display_name.clone(),
            balances,
            lifetime_earned,
            upgrades,
            boosts,
            tier_rank: state.tier.rank,
            tier_progress: state.tier.progress,
            ascension_count: state.ascension_count,
            coins_at_last_ascension: state.coins_at_last_ascension,
            energy: state.energy,
            metrics: MetricsEntry {
                total_clicks: state.metrics.total_clicks,
                total_crits: state.metrics.total_crits,
                upgrades_purchased: state.metrics.upgrades_purchased,
                boosts_activated: state.metrics.boosts_activated,
                highest_tier: state.metrics.highest_tier,
            },
            achievements,
            save_time,
        }
    }

    /// Rebuild live state from a snapshot.
    ///
    /// Validation happens here: unknown keys are skipped (reported in the
    /// returned warnings), numeric fields outside their domain are clamped,
    /// and missing fields already took their serde defaults. The result is
    /// always a playable state.
    pub fn into_state(self) -> (GameState, Vec<EngineError>) {
        let mut warnings = Vec::new();

        let profile = PlayerProfile::with_id(self.player_id, self.display_name);
        let mut state = GameState::new(profile);

        for (key, amount) in &self.balances {
            match CurrencyKind::parse(key) {
                Some(kind) => state.ledger.reset_balance(kind, *amount),
                None => warnings.push(EngineError::MalformedSnapshot(format!(
                    "unknown currency key: {key}"
                ))),
            }
        }
        for (key, amount) in &self.lifetime_earned {
            if let Some(kind) = CurrencyKind::parse(key) {
                state.ledger.restore_lifetime_earned(kind, *amount);
            }
        }

        state.upgrades.clear();
        for (key, level) in &self.upgrades {
            match UpgradeId::parse(key) {
                Some(id) => {
                    if *level > 0 {
                        state.upgrades.insert(id, *level);
                    }
                }
                None => warnings.push(EngineError::InvalidUpgradeId(key.clone())),
            }
        }

        // Restore boosts in a deterministic order; the persisted expiry is
        // kept and stale entries fall out on the first sweep.
        let mut boost_entries: Vec<(&String, &BoostEntry)> = self.boosts.iter().collect();
        boost_entries.sort_by_key(|(_, entry)| entry.expires_at);
        for (key, entry) in boost_entries {
            match BoostKind::parse(key) {
                Some(kind) => state.boosts.restore(kind, entry.multiplier.max(1.0), entry.expires_at),
                None => warnings.push(EngineError::MalformedSnapshot(format!(
                    "unknown boost key: {key}"
                ))),
            }
        }

        state.tier = TierState {
            rank: self.tier_rank.min(crate::core::balance::MAX_TIER),
            progress: self
                .tier_progress
                .clamp(0.0, crate::core::balance::TIER_PROGRESS_THRESHOLD),
        };
        state.ascension_count = self.ascension_count;
        state.coins_at_last_ascension = self.coins_at_last_ascension.max(0.0);
        state.metrics = LifetimeMetrics {
            total_clicks: self.metrics.total_clicks,
            total_crits: self.metrics.total_crits,
            upgrades_purchased: self.metrics.upgrades_purchased,
            boosts_activated: self.metrics.boosts_activated,
            highest_tier: self.metrics.highest_tier,
        };
        state.energy = self.energy.clamp(0.0, stats::energy_capacity(&state));

        for (key, entry) in &self.achievements {
            match AchievementId::parse(key) {
                Some(id) => state
                    .achievements
                    .restore(id, entry.progress, entry.unlocked_at),
                None => warnings.push(EngineError::MalformedSnapshot(format!(
                    "unknown achievement key: {key}"
                ))),
            }
        }

        (state, warnings)
    }
}
