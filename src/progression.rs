//! Tier progression and ascension.
//!
//! Tiers advance on an experience-style progress counter fed by primary
//! gains; progress gets geometrically harder to earn at higher ranks.
//! Ascension is the deliberate hard reset: primary resources, energy, tier,
//! and coin-funded upgrades go back to initial values in exchange for dark
//! matter, which funds the permanent upgrade track.

use crate::core::balance::{
    ascension_requirement, ascension_reward, tier_coin_reward, tier_progress_divisor,
    MAX_TIER, TIER_PROGRESS_THRESHOLD,
};
use crate::core::constants::INITIAL_COINS;
use crate::core::game_state::GameState;
use crate::error::EngineError;
use crate::ledger::CurrencyKind;
use crate::stats;
use crate::upgrades::get_upgrade_def;

/// Tier rank and progress toward the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierState {
    pub rank: u32,
    /// 0..=100. Reset to 0 on advance; excess is dropped.
    pub progress: f64,
}

/// Result of crossing a tier threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierAdvance {
    pub new_rank: u32,
    pub coin_reward: f64,
    pub dark_matter_reward: f64,
}

/// Result of a successful ascension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscensionOutcome {
    pub dark_matter_reward: f64,
    pub ascension_count: u32,
}

/// Convert a primary gain into tier progress; advance on threshold.
///
/// At most one advance per call: progress resets to 0 on advance and the
/// excess is dropped. At the maximum tier, progress accumulates up to the
/// threshold and stops.
pub fn add_progress(state: &mut GameState, primary_gain: f64) -> Option<TierAdvance> {
    if primary_gain <= 0.0 {
        return None;
    }

    let units = primary_gain / tier_progress_divisor(state.tier.rank);
    state.tier.progress += units;

    if state.tier.progress < TIER_PROGRESS_THRESHOLD || state.tier.rank >= MAX_TIER {
        state.tier.progress = state.tier.progress.min(TIER_PROGRESS_THRESHOLD);
        return None;
    }

    state.tier.rank += 1;
    state.tier.progress = 0.0;

    let coin_reward = tier_coin_reward(state.tier.rank);
    let dark_matter_reward = state.tier.rank as f64;
    state.ledger.credit(CurrencyKind::Coins, coin_reward);
    state
        .ledger
        .credit(CurrencyKind::DarkMatter, dark_matter_reward);
    state.metrics.highest_tier = state.metrics.highest_tier.max(state.tier.rank);

    Some(TierAdvance {
        new_rank: state.tier.rank,
        coin_reward,
        dark_matter_reward,
    })
}

/// True when the primary balance covers the current ascension requirement.
pub fn can_ascend(state: &GameState) -> bool {
    state.ledger.balance(CurrencyKind::Coins) >= ascension_requirement(state.ascension_count)
}

/// Performs an ascension: reward dark matter, then hard-reset the base run.
///
/// Resets primary coins, energy, tier, and every coin-funded upgrade level.
/// Dark matter (balance and funded upgrade levels), gems, lifetime metrics,
/// and achievements survive. All active boosts are cancelled; the stats
/// they multiplied no longer exist.
pub fn perform_ascension(state: &mut GameState) -> Result<AscensionOutcome, EngineError> {
    let requirement = ascension_requirement(state.ascension_count);
    let coins = state.ledger.balance(CurrencyKind::Coins);
    if coins < requirement {
        return Err(EngineError::InsufficientFunds {
            kind: CurrencyKind::Coins,
            required: requirement,
            available: coins,
        });
    }

    let dark_matter_reward = ascension_reward(state.coins_earned_since_ascension());
    state
        .ledger
        .credit(CurrencyKind::DarkMatter, dark_matter_reward);

    // Hard reset of the base run.
    state.ledger.reset_balance(CurrencyKind::Coins, INITIAL_COINS);
    state
        .upgrades
        .retain(|id, _| get_upgrade_def(*id).currency != CurrencyKind::Coins);
    state.boosts.clear();
    state.tier = TierState::default();
    state.energy = stats::energy_capacity(state);

    state.ascension_count += 1;
    state.coins_at_last_ascension = state.ledger.lifetime_earned(CurrencyKind::Coins);

    Ok(AscensionOutcome {
        dark_matter_reward,
        ascension_count: state.ascension_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosts::BoostKind;
    use crate::core::game_state::PlayerProfile;
    use crate::upgrades::UpgradeId;

    fn fresh_state() -> GameState {
        GameState::new(PlayerProfile::new("Climber".to_string()))
    }

    #[test]
    fn test_progress_accumulates_below_threshold() {
        let mut state = fresh_state();
        // Divisor at tier 0 is 50: 2,000 coins -> 40 units.
        assert!(add_progress(&mut state, 2_000.0).is_none());
        assert!((state.tier.progress - 40.0).abs() < 1e-9);
        assert_eq!(state.tier.rank, 0);
    }

    #[test]
    fn test_tier_advance_resets_progress_and_pays_rewards() {
        let mut state = fresh_state();
        state.tier.progress = 99.5;
        let coins_before = state.ledger.balance(CurrencyKind::Coins);

        // 0.5 units at tier 0 = 25 coins of gain; give a little more.
        let advance = add_progress(&mut state, 30.0).expect("should advance");

        assert_eq!(advance.new_rank, 1);
        assert_eq!(state.tier.rank, 1);
        assert_eq!(state.tier.progress, 0.0);
        assert_eq!(advance.coin_reward, tier_coin_reward(1));
        assert_eq!(advance.dark_matter_reward, 1.0);
        assert!(state.ledger.balance(CurrencyKind::Coins) > coins_before);
        assert_eq!(state.ledger.balance(CurrencyKind::DarkMatter), 1.0);
        assert_eq!(state.metrics.highest_tier, 1);
    }

    #[test]
    fn test_excess_progress_is_dropped_not_carried() {
        let mut state = fresh_state();
        state.tier.progress = 99.0;

        // A huge gain would overshoot by far; the new tier starts at 0.
        add_progress(&mut state, 1_000_000.0).expect("should advance");
        assert_eq!(state.tier.rank, 1);
        assert_eq!(state.tier.progress, 0.0);
    }

    #[test]
    fn test_progress_is_harder_at_higher_tiers() {
        let mut low = fresh_state();
        let mut high = fresh_state();
        high.tier.rank = 5;

        add_progress(&mut low, 1_000.0);
        add_progress(&mut high, 1_000.0);
        assert!(high.tier.progress < low.tier.progress);
    }

    #[test]
    fn test_max_tier_caps_progress() {
        let mut state = fresh_state();
        state.tier.rank = MAX_TIER;

        assert!(add_progress(&mut state, f64::MAX / 1e6).is_none());
        assert_eq!(state.tier.rank, MAX_TIER);
        assert_eq!(state.tier.progress, TIER_PROGRESS_THRESHOLD);
    }

    #[test]
    fn test_ascend_rejected_below_requirement() {
        let mut state = fresh_state();
        let err = perform_ascension(&mut state).unwrap_err();

        assert!(matches!(err, EngineError::InsufficientFunds { .. }));
        assert_eq!(state.ascension_count, 0);
        assert_eq!(state.ledger.balance(CurrencyKind::Coins), INITIAL_COINS);
    }

    #[test]
    fn test_ascend_resets_base_run_and_grants_dark_matter() {
        let mut state = fresh_state();
        state.ledger.credit(CurrencyKind::Coins, 2_000_000.0);
        state.tier.rank = 4;
        state.tier.progress = 55.0;
        state.upgrades.insert(UpgradeId::ClickPower, 10);
        state.upgrades.insert(UpgradeId::AscendedGrip, 2);
        state.ledger.credit(CurrencyKind::Gems, 30.0);
        {
            let GameState {
                ref mut boosts,
                ref mut ledger,
                ..
            } = state;
            boosts.activate(BoostKind::Frenzy, ledger, 0).unwrap();
        }
        let dark_matter_before = state.ledger.balance(CurrencyKind::DarkMatter);

        let outcome = perform_ascension(&mut state).unwrap();

        // Reward: 2,000,100 lifetime coins -> 20 dark matter.
        assert_eq!(outcome.dark_matter_reward, 20.0);
        assert_eq!(outcome.ascension_count, 1);
        assert_eq!(state.ledger.balance(CurrencyKind::Coins), INITIAL_COINS);
        assert!(state.ledger.balance(CurrencyKind::DarkMatter) >= dark_matter_before);
        assert_eq!(state.tier, TierState::default());
        assert_eq!(state.upgrade_level(UpgradeId::ClickPower), 0);
        // Dark-matter-funded levels survive.
        assert_eq!(state.upgrade_level(UpgradeId::AscendedGrip), 2);
        // Boost timers are cancelled.
        assert_eq!(state.boosts.active_count(), 0);
        assert_eq!(state.energy, stats::energy_capacity(&state));
    }

    #[test]
    fn test_second_ascension_needs_double_requirement() {
        let mut state = fresh_state();
        state.ledger.credit(CurrencyKind::Coins, 1_500_000.0);
        perform_ascension(&mut state).unwrap();

        state.ledger.credit(CurrencyKind::Coins, 1_500_000.0);
        assert!(!can_ascend(&state));
        let err = perform_ascension(&mut state).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientFunds { .. }));

        state.ledger.credit(CurrencyKind::Coins, 500_000.0);
        assert!(can_ascend(&state));
        let outcome = perform_ascension(&mut state).unwrap();
        assert_eq!(outcome.ascension_count, 2);
    }

    #[test]
    fn test_ascension_reward_counts_only_coins_since_last_reset() {
        let mut state = fresh_state();
        state.ledger.credit(CurrencyKind::Coins, 1_000_000.0);
        let first = perform_ascension(&mut state).unwrap();
        assert_eq!(first.dark_matter_reward, 10.0);

        // Earn exactly the new requirement; reward reflects only this cycle.
        state.ledger.credit(CurrencyKind::Coins, 2_000_000.0);
        let second = perform_ascension(&mut state).unwrap();
        assert_eq!(second.dark_matter_reward, 20.0);
    }
}
