//! The engine facade: one instance per active session.
//!
//! Owns the full game state and the stat cache, and is constructed with an
//! injected clock, persistence gateway, and leaderboard source so the whole
//! loop runs deterministically under test. All public operations are
//! single-threaded, cooperative, and complete synchronously: no mutation
//! suspends halfway, and remote I/O failures never roll back local state.

use crate::boosts::{ActiveBoost, BoostKind};
use crate::clock::Clock;
use crate::core::constants::{AUTOSAVE_INTERVAL_TICKS, CLICK_ENERGY_COST};
use crate::core::game_state::{GameState, PlayerProfile};
use crate::core::tick::{self, EngineEvent, TickResult};
use crate::error::EngineError;
use crate::leaderboard::{LeaderboardCategory, LeaderboardEntry, LeaderboardSource};
use crate::ledger::CurrencyKind;
use crate::persistence::{PersistenceGateway, Snapshot};
use crate::progression::{self, AscensionOutcome, TierAdvance};
use crate::stats::{StatEngine, StatSnapshot};
use crate::upgrades::{self, PurchaseOutcome, UpgradeId};
use rand::Rng;
use tracing::{debug, info, warn};

/// Result of one primary click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    pub coins_earned: f64,
    pub was_crit: bool,
    /// Set when the click's gain pushed tier progress over the threshold.
    pub tier_advance: Option<TierAdvance>,
}

pub struct GameEngine {
    state: GameState,
    stat_engine: StatEngine,
    gateway: PersistenceGateway,
    leaderboard: Box<dyn LeaderboardSource>,
    clock: Box<dyn Clock>,
    ticks_since_save: u32,
}

impl GameEngine {
    /// Load a player's session, reconciling local and remote snapshots, or
    /// start a fresh profile if neither side has one.
    pub fn load_or_create(
        player_id: &str,
        display_name: &str,
        gateway: PersistenceGateway,
        leaderboard: Box<dyn LeaderboardSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let state = match gateway.load(player_id) {
            Some(snapshot) => {
                let (state, warnings) = snapshot.into_state();
                for warning in warnings {
                    warn!(%warning, "snapshot entry skipped on load");
                }
                info!(player_id, "loaded existing profile");
                state
            }
            None => {
                info!(player_id, "no snapshot found, starting fresh profile");
                GameState::new(PlayerProfile::with_id(
                    player_id.to_string(),
                    display_name.to_string(),
                ))
            }
        };
        Self::with_state(state, gateway, leaderboard, clock)
    }

    /// Wrap an existing state (host-restored sessions, tests).
    pub fn with_state(
        state: GameState,
        gateway: PersistenceGateway,
        leaderboard: Box<dyn LeaderboardSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            state,
            stat_engine: StatEngine::new(),
            gateway,
            leaderboard,
            clock,
            ticks_since_save: 0,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current derived stats (cached between mutations).
    pub fn stats(&mut self) -> StatSnapshot {
        self.stat_engine.current(&self.state)
    }

    /// The primary action: spend one energy, earn coins, maybe crit.
    ///
    /// Rejected as a no-op when energy is empty. The crit roll comes from
    /// the injected RNG so tests can pin either branch.
    pub fn click<R: Rng>(&mut self, rng: &mut R) -> Result<ClickOutcome, EngineError> {
        if self.state.energy < CLICK_ENERGY_COST {
            return Err(EngineError::OutOfEnergy);
        }
        self.state.energy -= CLICK_ENERGY_COST;

        let derived = self.stat_engine.current(&self.state);
        let was_crit = rng.gen::<f64>() < derived.crit_chance;
        let mut coins_earned = derived.click_yield;
        if was_crit {
            coins_earned *= derived.crit_multiplier;
        }

        self.state.ledger.credit(CurrencyKind::Coins, coins_earned);
        self.state.metrics.total_clicks += 1;
        if was_crit {
            self.state.metrics.total_crits += 1;
        }

        let tier_advance = progression::add_progress(&mut self.state, coins_earned);
        if tier_advance.is_some() {
            self.stat_engine.invalidate();
        }

        self.after_mutation();
        Ok(ClickOutcome {
            coins_earned,
            was_crit,
            tier_advance,
        })
    }

    /// Buy one level of an upgrade.
    pub fn purchase(&mut self, id: UpgradeId) -> Result<PurchaseOutcome, EngineError> {
        let outcome = upgrades::purchase_upgrade(&mut self.state, id)?;
        self.stat_engine.invalidate();
        debug!(?id, level = outcome.new_level, "upgrade purchased");
        self.after_mutation();
        Ok(outcome)
    }

    /// Activate a timed boost, paying its gem cost.
    pub fn activate_boost(&mut self, kind: BoostKind) -> Result<ActiveBoost, EngineError> {
        let now_ms = self.clock.now_ms();
        let boost = {
            let GameState {
                ref mut boosts,
                ref mut ledger,
                ..
            } = self.state;
            boosts.activate(kind, ledger, now_ms)?
        };
        self.state.metrics.boosts_activated += 1;
        self.stat_engine.invalidate();
        debug!(?kind, expires_at = boost.expires_at, "boost activated");
        self.after_mutation();
        Ok(boost)
    }

    /// Hard-reset the base run in exchange for dark matter.
    ///
    /// Clears all boost timers immediately; ascension invalidates the
    /// stats they multiplied.
    pub fn ascend(&mut self) -> Result<AscensionOutcome, EngineError> {
        let outcome = progression::perform_ascension(&mut self.state)?;
        self.stat_engine.invalidate();
        info!(
            ascension = outcome.ascension_count,
            reward = outcome.dark_matter_reward,
            "ascended"
        );
        self.after_mutation();
        Ok(outcome)
    }

    /// Process one 100ms tick: boost sweep, energy regen, passive income,
    /// achievement evaluation, autosave cadence.
    pub fn tick(&mut self) -> TickResult {
        let now_ms = self.clock.now_ms();
        let mut result = tick::engine_tick(&mut self.state, &mut self.stat_engine, now_ms);

        self.ticks_since_save += 1;
        if self.ticks_since_save >= AUTOSAVE_INTERVAL_TICKS {
            self.save();
            result.saved = true;
        }
        result
    }

    /// Snapshot the current state and persist it (local sync, remote
    /// best-effort). Safe to call arbitrarily often.
    pub fn save(&mut self) {
        let snapshot = Snapshot::from_state(&self.state, self.clock.now_ms());
        self.gateway.save(&snapshot);
        self.ticks_since_save = 0;
    }

    /// Ranked players for a category. An unreachable service surfaces as
    /// [`EngineError::LeaderboardUnavailable`]; treat it as an empty board.
    pub fn leaderboard(
        &self,
        category: LeaderboardCategory,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        self.leaderboard.query(category).map_err(|err| {
            warn!(%err, "leaderboard query failed");
            err
        })
    }

    /// Achievement unlocks queued since the last drain. The tick drains
    /// these into events; hosts that do not tick can poll here instead.
    pub fn take_unlock_events(&mut self) -> Vec<EngineEvent> {
        self.state
            .achievements
            .take_newly_unlocked()
            .into_iter()
            .map(|id| EngineEvent::AchievementUnlocked { id })
            .collect()
    }

    /// Every mutating operation ends here: evaluate achievements against
    /// the new counters, then persist.
    fn after_mutation(&mut self) {
        tick::evaluate_achievements(&mut self.state, self.clock.now_ms());
        self.save();
    }
}
