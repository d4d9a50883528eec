//! Resource ledger: the single funnel for all balance mutation.
//!
//! Every credit and debit in the engine goes through [`ResourceLedger`] so
//! the non-negativity invariant holds at every observable boundary. Debits
//! are check-then-act in one call; there is no partial state to observe.

use crate::error::EngineError;
use std::collections::HashMap;
use std::fmt;

/// The currencies the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyKind {
    /// Primary spendable resource, earned by clicks and passive income.
    Coins,
    /// Meta-currency. Survives ascension; funds permanent upgrades.
    DarkMatter,
    /// Premium currency. Funds timed boosts.
    Gems,
}

impl CurrencyKind {
    /// All kinds in display order.
    pub const ALL: [CurrencyKind; 3] = [
        CurrencyKind::Coins,
        CurrencyKind::DarkMatter,
        CurrencyKind::Gems,
    ];

    /// Stable string key used in snapshots and wire payloads.
    pub fn key(&self) -> &'static str {
        match self {
            CurrencyKind::Coins => "coins",
            CurrencyKind::DarkMatter => "dark_matter",
            CurrencyKind::Gems => "gems",
        }
    }

    /// Parse a snapshot key back into a kind.
    pub fn parse(key: &str) -> Option<CurrencyKind> {
        CurrencyKind::ALL.into_iter().find(|k| k.key() == key)
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Owns the numeric balances and lifetime-earned totals per currency.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    balances: HashMap<CurrencyKind, f64>,
    lifetime_earned: HashMap<CurrencyKind, f64>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase a balance. Negative amounts are treated as zero.
    pub fn credit(&mut self, kind: CurrencyKind, amount: f64) {
        let amount = amount.max(0.0);
        *self.balances.entry(kind).or_insert(0.0) += amount;
        *self.lifetime_earned.entry(kind).or_insert(0.0) += amount;
    }

    /// Decrease a balance, atomically with respect to the check.
    ///
    /// Succeeds only if the current balance covers `amount`; otherwise the
    /// balance is untouched and [`EngineError::InsufficientFunds`] is
    /// returned.
    pub fn debit(&mut self, kind: CurrencyKind, amount: f64) -> Result<(), EngineError> {
        let balance = self.balances.entry(kind).or_insert(0.0);
        if *balance < amount {
            return Err(EngineError::InsufficientFunds {
                kind,
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }

    /// Current balance for a kind.
    pub fn balance(&self, kind: CurrencyKind) -> f64 {
        self.balances.get(&kind).copied().unwrap_or(0.0)
    }

    /// Total ever credited for a kind. Monotone non-decreasing.
    pub fn lifetime_earned(&self, kind: CurrencyKind) -> f64 {
        self.lifetime_earned.get(&kind).copied().unwrap_or(0.0)
    }

    /// Force a balance to an exact value without touching lifetime totals.
    ///
    /// Used only by ascension (reset to starting coins) and snapshot
    /// restore. Not part of the normal credit/debit flow.
    pub(crate) fn reset_balance(&mut self, kind: CurrencyKind, amount: f64) {
        self.balances.insert(kind, amount.max(0.0));
    }

    /// Restore a lifetime-earned total from a snapshot.
    pub(crate) fn restore_lifetime_earned(&mut self, kind: CurrencyKind, amount: f64) {
        self.lifetime_earned.insert(kind, amount.max(0.0));
    }
}
