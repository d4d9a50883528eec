//! Integration test: boost lifecycle through the engine
//!
//! Activation debits gems, composes into the global multiplier, expires
//! exactly once on the tick sweep, and is cancelled by ascension.

use burrow::boosts::BoostKind;
use burrow::clock::{Clock, ManualClock};
use burrow::core::constants::TICK_INTERVAL_MS;
use burrow::leaderboard::MemoryLeaderboard;
use burrow::ledger::CurrencyKind;
use burrow::persistence::{LocalCache, MemoryRemoteStore, PersistenceGateway};
use burrow::{EngineEvent, EngineError, GameEngine, GameState, PlayerProfile};
use std::rc::Rc;

struct SharedClock(Rc<ManualClock>);

impl Clock for SharedClock {
    fn now_ms(&self) -> i64 {
        self.0.now_ms()
    }
}

fn engine_with_gems(
    dir: &tempfile::TempDir,
    gems: f64,
) -> (GameEngine, Rc<ManualClock>) {
    let mut state = GameState::new(PlayerProfile::new("Booster".to_string()));
    state.ledger.credit(CurrencyKind::Gems, gems);

    let clock = Rc::new(ManualClock::new(0));
    let gateway = PersistenceGateway::new(
        LocalCache::with_dir(dir.path().to_path_buf()).unwrap(),
        Box::new(MemoryRemoteStore::new()),
    );
    let engine = GameEngine::with_state(
        state,
        gateway,
        Box::new(MemoryLeaderboard::default()),
        Box::new(SharedClock(clock.clone())),
    );
    (engine, clock)
}

#[test]
fn test_boost_expires_exactly_once_after_its_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, clock) = engine_with_gems(&dir, 25.0);

    // Overdrive: 5x for 10 seconds.
    engine.activate_boost(BoostKind::Overdrive).unwrap();
    assert_eq!(engine.stats().global_multiplier, 5.0);

    // Tick through the full duration plus slack; count expiry events.
    let mut expiries = 0;
    for _ in 0..150 {
        clock.advance(TICK_INTERVAL_MS as i64);
        let result = engine.tick();
        expiries += result
            .events
            .iter()
            .filter(|e| matches!(e, EngineEvent::BoostExpired { .. }))
            .count();
    }

    assert_eq!(expiries, 1, "expiry must fire exactly once");
    assert_eq!(engine.stats().global_multiplier, 1.0);
    assert_eq!(engine.state().boosts.active_count(), 0);
}

#[test]
fn test_distinct_kinds_compose_multiplicatively() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, clock) = engine_with_gems(&dir, 100.0);

    engine.activate_boost(BoostKind::Frenzy).unwrap(); // 2x, 60s
    engine.activate_boost(BoostKind::GoldenTouch).unwrap(); // 3x, 30s
    engine.activate_boost(BoostKind::Overdrive).unwrap(); // 5x, 10s
    assert_eq!(engine.stats().global_multiplier, 30.0);

    // After 10s only Overdrive has lapsed.
    clock.advance(10_000);
    engine.tick();
    assert_eq!(engine.stats().global_multiplier, 6.0);

    // After 30s GoldenTouch follows.
    clock.advance(20_000);
    engine.tick();
    assert_eq!(engine.stats().global_multiplier, 2.0);

    // And finally Frenzy.
    clock.advance(30_000);
    engine.tick();
    assert_eq!(engine.stats().global_multiplier, 1.0);
}

#[test]
fn test_reactivation_extends_instead_of_stacking() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, clock) = engine_with_gems(&dir, 10.0);

    engine.activate_boost(BoostKind::Frenzy).unwrap();
    clock.advance(40_000);
    engine.tick();

    // Re-activate 20s before expiry; the multiplier stays 2x, the expiry
    // moves to 40s + 60s.
    let boost = engine.activate_boost(BoostKind::Frenzy).unwrap();
    assert_eq!(boost.expires_at, 100_000);
    assert_eq!(engine.stats().global_multiplier, 2.0);
    assert_eq!(engine.state().boosts.active_count(), 1);

    // The original expiry time passes without effect.
    clock.advance(25_000);
    let result = engine.tick();
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::BoostExpired { .. })));
    assert_eq!(engine.stats().global_multiplier, 2.0);
}

#[test]
fn test_activation_without_gems_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, _clock) = engine_with_gems(&dir, 4.0);

    let err = engine.activate_boost(BoostKind::Frenzy).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert_eq!(engine.state().ledger.balance(CurrencyKind::Gems), 4.0);
    assert_eq!(engine.stats().global_multiplier, 1.0);
}

#[test]
fn test_ascension_cancels_active_boosts() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, clock) = engine_with_gems(&dir, 100.0);
    // Fund the ascension requirement.
    {
        let mut state = engine.state().clone();
        state.ledger.credit(CurrencyKind::Coins, 1_000_000.0);
        let gateway = PersistenceGateway::new(
            LocalCache::with_dir(dir.path().to_path_buf()).unwrap(),
            Box::new(MemoryRemoteStore::new()),
        );
        engine = GameEngine::with_state(
            state,
            gateway,
            Box::new(MemoryLeaderboard::default()),
            Box::new(SharedClock(clock.clone())),
        );
    }

    engine.activate_boost(BoostKind::Frenzy).unwrap();
    engine.activate_boost(BoostKind::GoldenTouch).unwrap();
    assert_eq!(engine.state().boosts.active_count(), 2);

    engine.ascend().unwrap();

    // Timers are gone immediately and no expiry events fire later.
    assert_eq!(engine.state().boosts.active_count(), 0);
    assert_eq!(engine.stats().global_multiplier, 1.0);
    clock.advance(120_000);
    let result = engine.tick();
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::BoostExpired { .. })));
}
