//! Static achievement definitions.

use super::types::{
    AchievementDef, AchievementId, AchievementMetric, AchievementReward,
};

/// Every achievement in the game, in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ── Clicks ──────────────────────────────────────────────────
    AchievementDef {
        id: AchievementId::ClickerI,
        name: "Warm Paws",
        description: "Click 100 times.",
        metric: AchievementMetric::TotalClicks,
        target: 100.0,
        reward: AchievementReward::Coins(500.0),
    },
    AchievementDef {
        id: AchievementId::ClickerII,
        name: "Calloused Paws",
        description: "Click 1,000 times.",
        metric: AchievementMetric::TotalClicks,
        target: 1_000.0,
        reward: AchievementReward::Gems(5.0),
    },
    AchievementDef {
        id: AchievementId::ClickerIII,
        name: "Iron Paws",
        description: "Click 10,000 times.",
        metric: AchievementMetric::TotalClicks,
        target: 10_000.0,
        reward: AchievementReward::Gems(25.0),
    },
    // ── Lifetime coins ──────────────────────────────────────────
    AchievementDef {
        id: AchievementId::FortuneI,
        name: "Pocket Change",
        description: "Earn 10,000 coins in total.",
        metric: AchievementMetric::CoinsEarned,
        target: 10_000.0,
        reward: AchievementReward::Coins(2_500.0),
    },
    AchievementDef {
        id: AchievementId::FortuneII,
        name: "Nest Egg",
        description: "Earn 1,000,000 coins in total.",
        metric: AchievementMetric::CoinsEarned,
        target: 1_000_000.0,
        reward: AchievementReward::Gems(10.0),
    },
    AchievementDef {
        id: AchievementId::FortuneIII,
        name: "Hoard of Ages",
        description: "Earn 100,000,000 coins in total.",
        metric: AchievementMetric::CoinsEarned,
        target: 100_000_000.0,
        reward: AchievementReward::Gems(50.0),
    },
    // ── Critical hits ───────────────────────────────────────────
    AchievementDef {
        id: AchievementId::CritI,
        name: "Sharp Claws",
        description: "Land 100 critical clicks.",
        metric: AchievementMetric::TotalCrits,
        target: 100.0,
        reward: AchievementReward::Coins(1_000.0),
    },
    AchievementDef {
        id: AchievementId::CritII,
        name: "Razor Claws",
        description: "Land 1,000 critical clicks.",
        metric: AchievementMetric::TotalCrits,
        target: 1_000.0,
        reward: AchievementReward::Gems(10.0),
    },
    // ── Tier milestones ─────────────────────────────────────────
    AchievementDef {
        id: AchievementId::TierIII,
        name: "Climbing the Ladder",
        description: "Reach tier 3.",
        metric: AchievementMetric::HighestTier,
        target: 3.0,
        reward: AchievementReward::Gems(5.0),
    },
    AchievementDef {
        id: AchievementId::TierX,
        name: "Upper Rungs",
        description: "Reach tier 10.",
        metric: AchievementMetric::HighestTier,
        target: 10.0,
        reward: AchievementReward::Gems(30.0),
    },
    // ── Ascensions ──────────────────────────────────────────────
    AchievementDef {
        id: AchievementId::FirstAscension,
        name: "Shed the Past",
        description: "Ascend for the first time.",
        metric: AchievementMetric::Ascensions,
        target: 1.0,
        reward: AchievementReward::Gems(20.0),
    },
    AchievementDef {
        id: AchievementId::AscensionV,
        name: "Serial Ascender",
        description: "Ascend five times.",
        metric: AchievementMetric::Ascensions,
        target: 5.0,
        reward: AchievementReward::Gems(100.0),
    },
    // ── Spending ────────────────────────────────────────────────
    AchievementDef {
        id: AchievementId::UpgradesX,
        name: "Smart Shopper",
        description: "Buy 10 upgrade levels.",
        metric: AchievementMetric::UpgradesPurchased,
        target: 10.0,
        reward: AchievementReward::Coins(5_000.0),
    },
    AchievementDef {
        id: AchievementId::UpgradesL,
        name: "Big Spender",
        description: "Buy 50 upgrade levels.",
        metric: AchievementMetric::UpgradesPurchased,
        target: 50.0,
        reward: AchievementReward::Gems(15.0),
    },
    AchievementDef {
        id: AchievementId::BoostsX,
        name: "Adrenaline Junkie",
        description: "Activate 10 boosts.",
        metric: AchievementMetric::BoostsActivated,
        target: 10.0,
        reward: AchievementReward::Gems(10.0),
    },
];

/// Look up the static definition for an achievement.
pub fn get_achievement_def(id: AchievementId) -> &'static AchievementDef {
    ALL_ACHIEVEMENTS
        .iter()
        .find(|d| d.id == id)
        .expect("every AchievementId has a definition")
}
