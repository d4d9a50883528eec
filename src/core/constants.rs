// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICKS_PER_SECOND: u32 = 10;
pub const AUTOSAVE_INTERVAL_SECONDS: u32 = 30;
pub const AUTOSAVE_INTERVAL_TICKS: u32 = AUTOSAVE_INTERVAL_SECONDS * TICKS_PER_SECOND;

// Starting balances
pub const INITIAL_COINS: f64 = 100.0;

// Click action
pub const BASE_CLICK_POWER: f64 = 1.0;
pub const CLICK_ENERGY_COST: f64 = 1.0;

// Critical hits
pub const BASE_CRIT_CHANCE: f64 = 0.05;
pub const CRIT_CHANCE_CEILING: f64 = 0.5;
pub const BASE_CRIT_MULTIPLIER: f64 = 2.0;

// Energy
pub const BASE_ENERGY_CAPACITY: f64 = 100.0;
pub const BASE_ENERGY_REGEN_PER_TICK: f64 = 1.0;

// HTTP collaborators
pub const REMOTE_TIMEOUT_SECONDS: u64 = 5;
pub const HTTP_USER_AGENT: &str = "burrow-engine";
