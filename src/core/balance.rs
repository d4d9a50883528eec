//! Shared balance constants and formulas.
//!
//! All tuning numbers for tiers and ascension live here.
//! Change once, test everywhere.

// =============================================================================
// TIER PROGRESSION
// =============================================================================

/// Progress needed to advance a tier. Excess over the threshold is dropped
/// on advance, not carried forward.
pub const TIER_PROGRESS_THRESHOLD: f64 = 100.0;

/// Coins of primary gain per progress unit at tier 0.
pub const TIER_PROGRESS_BASE_DIVISOR: f64 = 50.0;

/// Divisor growth per tier rank. Kept below 2.0 so high tiers remain
/// reachable in a human-scale session.
pub const TIER_PROGRESS_GROWTH: f64 = 1.6;

/// Highest reachable tier.
pub const MAX_TIER: u32 = 20;

/// Tier bonus formula: 1 + FACTOR * rank^EXPONENT.
/// Diminishing returns: strong early, tapering late.
pub const TIER_BONUS_FACTOR: f64 = 0.25;
pub const TIER_BONUS_EXPONENT: f64 = 0.8;

/// One-time coin reward on advance: BASE * new_rank^EXPONENT.
pub const TIER_REWARD_BASE: f64 = 250.0;
pub const TIER_REWARD_EXPONENT: f64 = 1.5;

// =============================================================================
// ASCENSION
// =============================================================================

/// Coins required for the first ascension; scales linearly with the
/// ascension count after that.
pub const ASCENSION_BASE_REQUIREMENT: f64 = 1_000_000.0;

/// Dark matter granted per this many coins earned since the last ascension.
pub const ASCENSION_META_DIVISOR: f64 = 100_000.0;

// =============================================================================
// Helpers
// =============================================================================

/// Multiplicative bonus for a tier rank.
///
/// Rank 0 is exactly 1.0; rank 1 is 1.25x; gains taper from there.
pub fn tier_bonus(rank: u32) -> f64 {
    1.0 + TIER_BONUS_FACTOR * (rank as f64).powf(TIER_BONUS_EXPONENT)
}

/// Coins of primary gain that buy one progress unit at a rank.
pub fn tier_progress_divisor(rank: u32) -> f64 {
    TIER_PROGRESS_BASE_DIVISOR * TIER_PROGRESS_GROWTH.powi(rank as i32)
}

/// One-time coin reward for reaching a rank.
pub fn tier_coin_reward(new_rank: u32) -> f64 {
    TIER_REWARD_BASE * (new_rank as f64).powf(TIER_REWARD_EXPONENT)
}

/// Coins required to ascend given how many ascensions came before.
pub fn ascension_requirement(ascension_count: u32) -> f64 {
    ASCENSION_BASE_REQUIREMENT * (ascension_count as f64 + 1.0)
}

/// Dark matter reward for coins earned since the last ascension.
pub fn ascension_reward(coins_earned_since: f64) -> f64 {
    (coins_earned_since.max(0.0) / ASCENSION_META_DIVISOR).floor()
}
