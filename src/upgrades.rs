//! Upgrade catalog and purchase logic.
//!
//! Upgrades are a closed set of tagged variants. Each carries its cost
//! curve, funding currency, and a typed effect that feeds the stat
//! derivation. Cost of the next level is `base_cost * growth^level`.

use crate::core::game_state::GameState;
use crate::error::EngineError;
use crate::ledger::CurrencyKind;

/// Closed set of purchasable upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeId {
    /// Multiplies click yield. The bread-and-butter upgrade.
    ClickPower,
    /// Adds passive coin income per tick.
    AutoClicker,
    /// Multiplies the global multiplier.
    CoinMagnet,
    /// Adds critical-hit chance.
    LuckyStreak,
    /// Raises energy capacity.
    EnergyCell,
    /// Raises energy regeneration per tick.
    EnergyRegen,
    /// Permanent click multiplier, funded by dark matter.
    AscendedGrip,
    /// Permanent global multiplier, funded by dark matter.
    DarkSynergy,
}

/// What an upgrade level contributes to the stat derivation.
#[derive(Debug, Clone, Copy)]
pub enum UpgradeEffect {
    /// Click yield is multiplied by `factor^level`.
    ClickFactor(f64),
    /// Passive income gains `rate * level` coins per tick.
    AutoYield(f64),
    /// Global multiplier is multiplied by `factor^level`.
    GlobalFactor(f64),
    /// Crit chance gains `chance * level` (clamped downstream).
    CritChance(f64),
    /// Energy capacity gains `amount * level`.
    EnergyCapacity(f64),
    /// Energy regeneration gains `amount * level` per tick.
    EnergyRegen(f64),
}

/// Static definition of an upgrade.
#[derive(Debug, Clone)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub currency: CurrencyKind,
    pub base_cost: f64,
    pub growth: f64,
    pub effect: UpgradeEffect,
}

/// Every upgrade in the game, in display order.
pub const ALL_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: UpgradeId::ClickPower,
        name: "Stronger Paws",
        description: "Each click earns 25% more per level.",
        currency: CurrencyKind::Coins,
        base_cost: 50.0,
        growth: 1.2,
        effect: UpgradeEffect::ClickFactor(1.25),
    },
    UpgradeDef {
        id: UpgradeId::AutoClicker,
        name: "Auto Clicker",
        description: "Earns coins every tick, hands-free.",
        currency: CurrencyKind::Coins,
        base_cost: 100.0,
        growth: 1.15,
        effect: UpgradeEffect::AutoYield(1.0),
    },
    UpgradeDef {
        id: UpgradeId::CoinMagnet,
        name: "Coin Magnet",
        description: "All income up 10% per level.",
        currency: CurrencyKind::Coins,
        base_cost: 500.0,
        growth: 1.3,
        effect: UpgradeEffect::GlobalFactor(1.1),
    },
    UpgradeDef {
        id: UpgradeId::LuckyStreak,
        name: "Lucky Streak",
        description: "+1% critical-hit chance per level.",
        currency: CurrencyKind::Coins,
        base_cost: 250.0,
        growth: 1.35,
        effect: UpgradeEffect::CritChance(0.01),
    },
    UpgradeDef {
        id: UpgradeId::EnergyCell,
        name: "Energy Cell",
        description: "+25 energy capacity per level.",
        currency: CurrencyKind::Coins,
        base_cost: 200.0,
        growth: 1.25,
        effect: UpgradeEffect::EnergyCapacity(25.0),
    },
    UpgradeDef {
        id: UpgradeId::EnergyRegen,
        name: "Quick Recovery",
        description: "+0.2 energy regeneration per tick per level.",
        currency: CurrencyKind::Coins,
        base_cost: 300.0,
        growth: 1.25,
        effect: UpgradeEffect::EnergyRegen(0.2),
    },
    UpgradeDef {
        id: UpgradeId::AscendedGrip,
        name: "Ascended Grip",
        description: "Permanent 50% click bonus per level. Survives ascension.",
        currency: CurrencyKind::DarkMatter,
        base_cost: 5.0,
        growth: 2.0,
        effect: UpgradeEffect::ClickFactor(1.5),
    },
    UpgradeDef {
        id: UpgradeId::DarkSynergy,
        name: "Dark Synergy",
        description: "Permanent 25% global bonus per level. Survives ascension.",
        currency: CurrencyKind::DarkMatter,
        base_cost: 10.0,
        growth: 2.5,
        effect: UpgradeEffect::GlobalFactor(1.25),
    },
];

impl UpgradeId {
    /// Stable string key used in snapshots.
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeId::ClickPower => "click_power",
            UpgradeId::AutoClicker => "auto_clicker",
            UpgradeId::CoinMagnet => "coin_magnet",
            UpgradeId::LuckyStreak => "lucky_streak",
            UpgradeId::EnergyCell => "energy_cell",
            UpgradeId::EnergyRegen => "energy_regen",
            UpgradeId::AscendedGrip => "ascended_grip",
            UpgradeId::DarkSynergy => "dark_synergy",
        }
    }

    /// Parse a snapshot key. Unknown keys return `None` and are skipped
    /// by the snapshot loader.
    pub fn parse(key: &str) -> Option<UpgradeId> {
        ALL_UPGRADES.iter().find(|d| d.id.key() == key).map(|d| d.id)
    }
}

/// Look up the static definition for an upgrade.
pub fn get_upgrade_def(id: UpgradeId) -> &'static UpgradeDef {
    ALL_UPGRADES
        .iter()
        .find(|d| d.id == id)
        .expect("every UpgradeId has a definition")
}

/// Cost of buying the next level given the current one.
pub fn next_level_cost(def: &UpgradeDef, current_level: u32) -> f64 {
    def.base_cost * def.growth.powi(current_level as i32)
}

/// Result of a successful purchase.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseOutcome {
    pub id: UpgradeId,
    pub new_level: u32,
    pub cost: f64,
}

/// Buy one level of an upgrade, debiting its funding currency.
///
/// Fails with [`EngineError::InsufficientFunds`] and no state change if
/// the cost is unaffordable.
pub fn purchase_upgrade(state: &mut GameState, id: UpgradeId) -> Result<PurchaseOutcome, EngineError> {
    let def = get_upgrade_def(id);
    let level = state.upgrade_level(id);
    let cost = next_level_cost(def, level);

    state.ledger.debit(def.currency, cost)?;
    *state.upgrades.entry(id).or_insert(0) += 1;
    state.metrics.upgrades_purchased += 1;

    Ok(PurchaseOutcome {
        id,
        new_level: level + 1,
        cost,
    })
}
