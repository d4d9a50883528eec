//! Achievement system types and evaluation.

use crate::ledger::ResourceLedger;
use std::collections::HashMap;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    // Clicks
    ClickerI,   // 100 clicks
    ClickerII,  // 1,000 clicks
    ClickerIII, // 10,000 clicks
    // Lifetime coins
    FortuneI,   // 10,000 coins
    FortuneII,  // 1,000,000 coins
    FortuneIII, // 100,000,000 coins
    // Critical hits
    CritI,  // 100 crits
    CritII, // 1,000 crits
    // Tier milestones
    TierIII, // reach tier 3
    TierX,   // reach tier 10
    // Ascensions
    FirstAscension,
    AscensionV,
    // Spending
    UpgradesX, // 10 upgrades purchased
    UpgradesL, // 50 upgrades purchased
    BoostsX,   // 10 boosts activated
}

impl AchievementId {
    /// Stable string key used in snapshots.
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::ClickerI => "clicker_i",
            AchievementId::ClickerII => "clicker_ii",
            AchievementId::ClickerIII => "clicker_iii",
            AchievementId::FortuneI => "fortune_i",
            AchievementId::FortuneII => "fortune_ii",
            AchievementId::FortuneIII => "fortune_iii",
            AchievementId::CritI => "crit_i",
            AchievementId::CritII => "crit_ii",
            AchievementId::TierIII => "tier_iii",
            AchievementId::TierX => "tier_x",
            AchievementId::FirstAscension => "first_ascension",
            AchievementId::AscensionV => "ascension_v",
            AchievementId::UpgradesX => "upgrades_x",
            AchievementId::UpgradesL => "upgrades_l",
            AchievementId::BoostsX => "boosts_x",
        }
    }

    /// Parse a snapshot key. Unknown keys are skipped by the loader.
    pub fn parse(key: &str) -> Option<AchievementId> {
        super::data::ALL_ACHIEVEMENTS
            .iter()
            .find(|d| d.id.key() == key)
            .map(|d| d.id)
    }
}

/// Which lifetime counter an achievement watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementMetric {
    TotalClicks,
    CoinsEarned,
    TotalCrits,
    HighestTier,
    Ascensions,
    UpgradesPurchased,
    BoostsActivated,
}

/// One-time reward credited on unlock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AchievementReward {
    Coins(f64),
    Gems(f64),
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: AchievementMetric,
    pub target: f64,
    pub reward: AchievementReward,
}

/// A point-in-time reading of every tracked metric.
///
/// Built by the engine before evaluation so the evaluation itself never
/// needs to read the ledger it is about to credit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricSample {
    pub total_clicks: u64,
    pub coins_earned: f64,
    pub total_crits: u64,
    pub highest_tier: u32,
    pub ascensions: u32,
    pub upgrades_purchased: u64,
    pub boosts_activated: u64,
}

impl MetricSample {
    fn value(&self, metric: AchievementMetric) -> f64 {
        match metric {
            AchievementMetric::TotalClicks => self.total_clicks as f64,
            AchievementMetric::CoinsEarned => self.coins_earned,
            AchievementMetric::TotalCrits => self.total_crits as f64,
            AchievementMetric::HighestTier => self.highest_tier as f64,
            AchievementMetric::Ascensions => self.ascensions as f64,
            AchievementMetric::UpgradesPurchased => self.upgrades_purchased as f64,
            AchievementMetric::BoostsActivated => self.boosts_activated as f64,
        }
    }
}

/// Per-profile achievement state.
#[derive(Debug, Clone, Default)]
pub struct Achievements {
    /// High-water progress per achievement. Never regresses.
    progress: HashMap<AchievementId, f64>,
    /// Unlock timestamps (ms). Presence means unlocked.
    unlocked: HashMap<AchievementId, i64>,
    /// Unlocks since the last drain, for event emission.
    newly_unlocked: Vec<AchievementId>,
}

impl Achievements {
    /// Check if an achievement is unlocked.
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// When an achievement unlocked, if it has.
    pub fn unlocked_at(&self, id: AchievementId) -> Option<i64> {
        self.unlocked.get(&id).copied()
    }

    /// High-water progress for an achievement.
    pub fn progress(&self, id: AchievementId) -> f64 {
        self.progress.get(&id).copied().unwrap_or(0.0)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    /// Advance every achievement against a metric sample.
    ///
    /// Progress is a high-water mark: `max(existing, metric)`, never a
    /// regression even if the underlying counter could shrink. Crossing the
    /// target flips `unlocked` exactly once, credits the reward exactly
    /// once, and queues the id for [`Self::take_newly_unlocked`].
    pub fn evaluate(&mut self, sample: &MetricSample, ledger: &mut ResourceLedger, now_ms: i64) {
        use crate::ledger::CurrencyKind;

        for def in super::data::ALL_ACHIEVEMENTS {
            let current = sample.value(def.metric);
            let entry = self.progress.entry(def.id).or_insert(0.0);
            *entry = entry.max(current);

            if *entry >= def.target && !self.unlocked.contains_key(&def.id) {
                self.unlocked.insert(def.id, now_ms);
                match def.reward {
                    AchievementReward::Coins(amount) => {
                        ledger.credit(CurrencyKind::Coins, amount)
                    }
                    AchievementReward::Gems(amount) => ledger.credit(CurrencyKind::Gems, amount),
                }
                self.newly_unlocked.push(def.id);
            }
        }
    }

    /// Drain the unlock queue. Each unlock appears here exactly once for
    /// the lifetime of the profile.
    pub fn take_newly_unlocked(&mut self) -> Vec<AchievementId> {
        std::mem::take(&mut self.newly_unlocked)
    }

    /// Restore one achievement from a snapshot.
    pub(crate) fn restore(&mut self, id: AchievementId, progress: f64, unlocked_at: Option<i64>) {
        self.progress.insert(id, progress.max(0.0));
        if let Some(at) = unlocked_at {
            self.unlocked.insert(id, at);
        }
    }

    /// Iterate state for snapshot serialization.
    pub(crate) fn iter_state(&self) -> impl Iterator<Item = (AchievementId, f64, Option<i64>)> + '_ {
        super::data::ALL_ACHIEVEMENTS.iter().filter_map(move |def| {
            let progress = self.progress.get(&def.id).copied();
            let unlocked_at = self.unlocked.get(&def.id).copied();
            if progress.is_none() && unlocked_at.is_none() {
                return None;
            }
            Some((def.id, progress.unwrap_or(0.0), unlocked_at))
        })
    }
}
