//! Per-tick orchestration: the discrete scheduler.
//!
//! Everything the source-of-truth timers used to do (energy regeneration,
//! passive income, boost-expiry sweep) happens here as one pure state
//! transition over `(state, now)`. The engine wraps this with the autosave
//! cadence. Returns a [`TickResult`] describing what happened so the
//! presentation layer can render without game logic depending on it.

use crate::achievements::AchievementId;
use crate::boosts::BoostKind;
use crate::core::game_state::GameState;
use crate::ledger::CurrencyKind;
use crate::progression::{self, TierAdvance};
use crate::stats::{self, StatEngine};

/// A single event produced by engine activity.
///
/// The presentation layer maps these to log lines, effects, and UI state;
/// the engine never touches UI types.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Passive sources produced coins this tick.
    PassiveIncome { amount: f64 },

    /// A boost reached its expiry and was removed (exactly once).
    BoostExpired { kind: BoostKind },

    /// Tier progress crossed the threshold.
    TierAdvanced {
        new_rank: u32,
        coin_reward: f64,
        dark_matter_reward: f64,
    },

    /// An achievement was unlocked (exactly once per profile lifetime).
    AchievementUnlocked { id: AchievementId },
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<EngineEvent>,

    /// True if the autosave cadence triggered a save this tick.
    /// Set by the engine wrapper, not by [`engine_tick`] itself.
    pub saved: bool,
}

/// Processes a single game tick at `now_ms`.
///
/// Order: boost-expiry sweep, energy regeneration, passive income (which
/// also feeds tier progress), achievement evaluation. Each tick is one
/// indivisible step; no mutation is observable halfway.
pub fn engine_tick(state: &mut GameState, stat_engine: &mut StatEngine, now_ms: i64) -> TickResult {
    let mut result = TickResult::default();

    // ── 1. Boost-expiry sweep ───────────────────────────────────
    let expired = state.boosts.sweep(now_ms);
    if !expired.is_empty() {
        stat_engine.invalidate();
        for kind in expired {
            result.events.push(EngineEvent::BoostExpired { kind });
        }
    }

    // ── 2. Energy regeneration ──────────────────────────────────
    let capacity = stats::energy_capacity(state);
    let regen = stats::energy_regen_per_tick(state);
    state.energy = (state.energy + regen).min(capacity);

    // ── 3. Passive income ───────────────────────────────────────
    let derived = stat_engine.current(state);
    if derived.passive_yield_per_tick > 0.0 {
        let amount = derived.passive_yield_per_tick;
        state.ledger.credit(CurrencyKind::Coins, amount);
        result.events.push(EngineEvent::PassiveIncome { amount });

        if let Some(advance) = progression::add_progress(state, amount) {
            stat_engine.invalidate();
            result.events.push(tier_advance_event(advance));
        }
    }

    // ── 4. Achievement evaluation ───────────────────────────────
    evaluate_achievements(state, now_ms);
    for id in state.achievements.take_newly_unlocked() {
        result.events.push(EngineEvent::AchievementUnlocked { id });
    }

    result
}

/// Sample every tracked metric and advance achievement progress.
///
/// Unlocks queue inside the achievement state; the tick drains them into
/// events so each fires exactly once no matter which operation caused it.
pub fn evaluate_achievements(state: &mut GameState, now_ms: i64) {
    let sample = crate::achievements::MetricSample {
        total_clicks: state.metrics.total_clicks,
        coins_earned: state.ledger.lifetime_earned(CurrencyKind::Coins),
        total_crits: state.metrics.total_crits,
        highest_tier: state.metrics.highest_tier,
        ascensions: state.ascension_count,
        upgrades_purchased: state.metrics.upgrades_purchased,
        boosts_activated: state.metrics.boosts_activated,
    };
    let GameState {
        ref mut achievements,
        ref mut ledger,
        ..
    } = *state;
    achievements.evaluate(&sample, ledger, now_ms);
}

pub(crate) fn tier_advance_event(advance: TierAdvance) -> EngineEvent {
    EngineEvent::TierAdvanced {
        new_rank: advance.new_rank,
        coin_reward: advance.coin_reward,
        dark_matter_reward: advance.dark_matter_reward,
    }
}
