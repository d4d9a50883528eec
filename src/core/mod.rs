//! Core engine: state, constants, balance formulas, tick orchestration,
//! and the session facade.

pub mod balance;
pub mod constants;
pub mod engine;
pub mod game_state;
pub mod tick;
