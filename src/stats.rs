//! Derived stat computation.
//!
//! Effective rates are a pure function of owned upgrades, tier rank, and
//! active boosts, recomputed on demand and cached until an input changes.
//! The multiplier composition order is fixed (tier bonus, then boosts in
//! activation order, then upgrade factors) so two engines holding identical
//! state always derive identical stats.

use crate::core::balance::tier_bonus;
use crate::core::constants::{
    BASE_CLICK_POWER, BASE_CRIT_CHANCE, BASE_CRIT_MULTIPLIER, BASE_ENERGY_CAPACITY,
    BASE_ENERGY_REGEN_PER_TICK, CRIT_CHANCE_CEILING,
};
use crate::core::game_state::GameState;
use crate::upgrades::{UpgradeEffect, ALL_UPGRADES};

/// Effective rates derived from current state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSnapshot {
    /// Coins earned by one non-critical click (global multiplier included).
    pub click_yield: f64,
    /// Coins earned per tick from passive sources (global multiplier included).
    pub passive_yield_per_tick: f64,
    /// Tier bonus x active boosts x multiplier upgrades.
    pub global_multiplier: f64,
    /// Chance a click crits, clamped to the ceiling.
    pub crit_chance: f64,
    /// Yield multiplier applied to a critical click.
    pub crit_multiplier: f64,
}

/// Compute the full stat snapshot from scratch.
pub fn compute_stats(state: &GameState) -> StatSnapshot {
    // 1. Tier bonus.
    let mut global_multiplier = tier_bonus(state.tier.rank);

    // 2. Active boosts, in activation order.
    for (_, boost) in state.boosts.iter_in_activation_order() {
        global_multiplier *= boost.multiplier;
    }

    // 3. Upgrade-derived factors, in catalog order.
    let mut click_factor = 1.0;
    let mut auto_rate = 0.0;
    let mut crit_chance = BASE_CRIT_CHANCE;
    for def in ALL_UPGRADES {
        let level = state.upgrade_level(def.id);
        if level == 0 {
            continue;
        }
        match def.effect {
            UpgradeEffect::ClickFactor(factor) => {
                click_factor *= factor.powi(level as i32);
            }
            UpgradeEffect::GlobalFactor(factor) => {
                global_multiplier *= factor.powi(level as i32);
            }
            UpgradeEffect::AutoYield(rate) => {
                auto_rate += rate * level as f64;
            }
            UpgradeEffect::CritChance(chance) => {
                crit_chance += chance * level as f64;
            }
            UpgradeEffect::EnergyCapacity(_) | UpgradeEffect::EnergyRegen(_) => {}
        }
    }

    StatSnapshot {
        click_yield: BASE_CLICK_POWER * click_factor * global_multiplier,
        passive_yield_per_tick: auto_rate * global_multiplier,
        global_multiplier,
        crit_chance: crit_chance.min(CRIT_CHANCE_CEILING),
        crit_multiplier: BASE_CRIT_MULTIPLIER,
    }
}

/// Energy capacity derived from upgrades.
pub fn energy_capacity(state: &GameState) -> f64 {
    let mut capacity = BASE_ENERGY_CAPACITY;
    for def in ALL_UPGRADES {
        if let UpgradeEffect::EnergyCapacity(amount) = def.effect {
            capacity += amount * state.upgrade_level(def.id) as f64;
        }
    }
    capacity
}

/// Energy regeneration per tick derived from upgrades.
pub fn energy_regen_per_tick(state: &GameState) -> f64 {
    let mut regen = BASE_ENERGY_REGEN_PER_TICK;
    for def in ALL_UPGRADES {
        if let UpgradeEffect::EnergyRegen(amount) = def.effect {
            regen += amount * state.upgrade_level(def.id) as f64;
        }
    }
    regen
}

/// Demand-driven cache over [`compute_stats`].
///
/// Callers must invalidate after any mutation of upgrades, tier, or boosts;
/// reads between mutations are then a single copy.
#[derive(Debug, Default)]
pub struct StatEngine {
    cached: Option<StatSnapshot>,
}

impl StatEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stats, recomputing if an input changed since the last read.
    pub fn current(&mut self, state: &GameState) -> StatSnapshot {
        if let Some(snapshot) = self.cached {
            return snapshot;
        }
        let snapshot = compute_stats(state);
        self.cached = Some(snapshot);
        snapshot
    }

    /// Drop the cache after an input mutation.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
