//! Headless progression simulator.
//!
//! Drives the engine through simulated play (clicking, greedy upgrade
//! buying, boost usage, ascending when possible) under a manual clock to
//! sanity-check the economy curve without a UI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                   # Default: 1 simulated hour
//!   cargo run --bin simulate -- -t 720000      # 20 simulated hours
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use burrow::boosts::{get_boost_def, BoostKind};
use burrow::clock::{Clock, ManualClock};
use burrow::core::constants::TICK_INTERVAL_MS;
use burrow::leaderboard::MemoryLeaderboard;
use burrow::ledger::CurrencyKind;
use burrow::persistence::{LocalCache, MemoryRemoteStore, PersistenceGateway};
use burrow::upgrades::{next_level_cost, ALL_UPGRADES};
use burrow::GameEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::rc::Rc;

struct SimConfig {
    ticks: u64,
    seed: u64,
    clicks_per_second: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 36_000, // one simulated hour at 10 ticks/second
            seed: 1,
            clicks_per_second: 5,
        }
    }
}

struct SharedClock(Rc<ManualClock>);

impl Clock for SharedClock {
    fn now_ms(&self) -> i64 {
        self.0.now_ms()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = parse_args(&env::args().collect::<Vec<_>>());

    println!("burrow progression simulator");
    println!("  ticks:      {}", config.ticks);
    println!("  seed:       {}", config.seed);
    println!("  clicks/sec: {}", config.clicks_per_second);
    println!();

    let clock = Rc::new(ManualClock::new(0));
    // Per-process cache dir so reruns start fresh instead of resuming.
    let cache_dir = std::env::temp_dir().join(format!("burrow-sim-{}", std::process::id()));
    let gateway = PersistenceGateway::new(
        LocalCache::with_dir(cache_dir).expect("simulator cache dir"),
        Box::new(MemoryRemoteStore::new()),
    );
    let mut engine = GameEngine::load_or_create(
        &format!("sim-{}", config.seed),
        "Simulated Hamster",
        gateway,
        Box::new(MemoryLeaderboard::default()),
        Box::new(SharedClock(clock.clone())),
    );
    let mut rng = StdRng::seed_from_u64(config.seed);

    let click_interval = (10 / config.clicks_per_second.clamp(1, 10)).max(1);
    let mut ascensions = 0u32;

    for tick_index in 0..config.ticks {
        clock.advance(TICK_INTERVAL_MS as i64);

        // Click at the configured cadence while energy allows.
        if tick_index % click_interval == 0 {
            let _ = engine.click(&mut rng);
        }

        // Greedily buy the cheapest affordable upgrade once a second.
        if tick_index % 10 == 0 {
            buy_cheapest_upgrade(&mut engine);
        }

        // Burn spare gems on the cheapest boost every few seconds.
        if tick_index % 50 == 0 {
            let gems = engine.state().ledger.balance(CurrencyKind::Gems);
            if gems >= get_boost_def(BoostKind::Frenzy).cost_gems {
                let _ = engine.activate_boost(BoostKind::Frenzy);
            }
        }

        if engine.ascend().is_ok() {
            ascensions += 1;
        }

        engine.tick();

        if tick_index % 6_000 == 0 && tick_index > 0 {
            let state = engine.state();
            println!(
                "t+{:>5}s  coins {:>14.0}  tier {:>2}  dm {:>6.0}  ascensions {}",
                tick_index / 10,
                state.ledger.balance(CurrencyKind::Coins),
                state.tier.rank,
                state.ledger.balance(CurrencyKind::DarkMatter),
                ascensions,
            );
        }
    }

    let state = engine.state();
    println!();
    println!("final report");
    println!(
        "  coins:          {:.0}",
        state.ledger.balance(CurrencyKind::Coins)
    );
    println!(
        "  lifetime coins: {:.0}",
        state.ledger.lifetime_earned(CurrencyKind::Coins)
    );
    println!(
        "  dark matter:    {:.0}",
        state.ledger.balance(CurrencyKind::DarkMatter)
    );
    println!("  tier:           {}", state.tier.rank);
    println!("  ascensions:     {}", state.ascension_count);
    println!("  total clicks:   {}", state.metrics.total_clicks);
    println!("  total crits:    {}", state.metrics.total_crits);
    println!(
        "  achievements:   {}/{}",
        state.achievements.unlocked_count(),
        state.achievements.total_count()
    );
}

fn buy_cheapest_upgrade(engine: &mut GameEngine) {
    let affordable = ALL_UPGRADES
        .iter()
        .map(|def| {
            let level = engine.state().upgrade_level(def.id);
            (def, next_level_cost(def, level))
        })
        .filter(|(def, cost)| engine.state().ledger.balance(def.currency) >= *cost)
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((def, _)) = affordable {
        let _ = engine.purchase(def.id);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.ticks = args[i + 1].parse().unwrap_or(config.ticks);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().unwrap_or(config.seed);
                    i += 1;
                }
            }
            "-c" | "--clicks" => {
                if i + 1 < args.len() {
                    config.clicks_per_second =
                        args[i + 1].parse().unwrap_or(config.clicks_per_second);
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Usage: simulate [-t TICKS] [-s SEED] [-c CLICKS_PER_SECOND]");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config
}
