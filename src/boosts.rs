//! Timed boost scheduling.
//!
//! Each boost kind is a small state machine: inactive → active(expires_at)
//! → inactive. Activation debits the premium currency through the ledger;
//! the tick-driven sweep removes expired boosts exactly once. Distinct kinds
//! compose multiplicatively; re-activating an active kind only replaces its
//! expiry.

use crate::error::EngineError;
use crate::ledger::{CurrencyKind, ResourceLedger};
use std::collections::HashMap;

/// Closed set of purchasable boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoostKind {
    /// Cheap 2x, long duration.
    Frenzy,
    /// 3x for half a minute.
    GoldenTouch,
    /// Short, expensive 5x burst.
    Overdrive,
}

/// Static definition of a boost kind.
#[derive(Debug, Clone)]
pub struct BoostDef {
    pub kind: BoostKind,
    pub name: &'static str,
    pub multiplier: f64,
    pub duration_ms: i64,
    pub cost_gems: f64,
}

/// Every boost in the game, in display order.
pub const ALL_BOOSTS: &[BoostDef] = &[
    BoostDef {
        kind: BoostKind::Frenzy,
        name: "Frenzy",
        multiplier: 2.0,
        duration_ms: 60_000,
        cost_gems: 5.0,
    },
    BoostDef {
        kind: BoostKind::GoldenTouch,
        name: "Golden Touch",
        multiplier: 3.0,
        duration_ms: 30_000,
        cost_gems: 12.0,
    },
    BoostDef {
        kind: BoostKind::Overdrive,
        name: "Overdrive",
        multiplier: 5.0,
        duration_ms: 10_000,
        cost_gems: 25.0,
    },
];

impl BoostKind {
    /// All kinds in display order.
    pub const ALL: [BoostKind; 3] = [
        BoostKind::Frenzy,
        BoostKind::GoldenTouch,
        BoostKind::Overdrive,
    ];

    /// Stable string key used in snapshots.
    pub fn key(&self) -> &'static str {
        match self {
            BoostKind::Frenzy => "frenzy",
            BoostKind::GoldenTouch => "golden_touch",
            BoostKind::Overdrive => "overdrive",
        }
    }

    /// Parse a snapshot key. Unknown keys are skipped by the loader.
    pub fn parse(key: &str) -> Option<BoostKind> {
        BoostKind::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// Look up the static definition for a boost kind.
pub fn get_boost_def(kind: BoostKind) -> &'static BoostDef {
    ALL_BOOSTS
        .iter()
        .find(|d| d.kind == kind)
        .expect("every BoostKind has a definition")
}

/// A currently active boost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBoost {
    pub multiplier: f64,
    pub expires_at: i64,
    /// Position in activation order; fixes the multiplier composition
    /// order so two engines with identical state derive identical stats.
    pub activation_seq: u64,
}

/// Tracks active boosts and their expiry timestamps.
#[derive(Debug, Clone, Default)]
pub struct BoostScheduler {
    active: HashMap<BoostKind, ActiveBoost>,
    next_seq: u64,
}

impl BoostScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a boost, debiting its gem cost through the ledger.
    ///
    /// On [`EngineError::InsufficientFunds`] nothing changes. Activating an
    /// already-active kind replaces its expiry (no stacking); the original
    /// activation order is kept.
    pub fn activate(
        &mut self,
        kind: BoostKind,
        ledger: &mut ResourceLedger,
        now_ms: i64,
    ) -> Result<ActiveBoost, EngineError> {
        let def = get_boost_def(kind);
        ledger.debit(CurrencyKind::Gems, def.cost_gems)?;

        let expires_at = now_ms + def.duration_ms;
        let seq = match self.active.get(&kind) {
            Some(existing) => existing.activation_seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        let boost = ActiveBoost {
            multiplier: def.multiplier,
            expires_at,
            activation_seq: seq,
        };
        self.active.insert(kind, boost);
        Ok(boost)
    }

    /// Remove every boost with `expires_at <= now_ms`, exactly once.
    ///
    /// Returns the expired kinds; an immediate re-sweep is a no-op.
    pub fn sweep(&mut self, now_ms: i64) -> Vec<BoostKind> {
        let mut expired: Vec<BoostKind> = self
            .active
            .iter()
            .filter(|(_, b)| b.expires_at <= now_ms)
            .map(|(k, _)| *k)
            .collect();
        expired.sort_by_key(|k| self.active[k].activation_seq);
        for kind in &expired {
            self.active.remove(kind);
        }
        expired
    }

    /// Cancel every active boost (ascension invalidates their basis).
    pub fn clear(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    pub fn is_active(&self, kind: BoostKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn get(&self, kind: BoostKind) -> Option<&ActiveBoost> {
        self.active.get(&kind)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Active boosts sorted by activation order.
    pub fn iter_in_activation_order(&self) -> Vec<(BoostKind, ActiveBoost)> {
        let mut boosts: Vec<(BoostKind, ActiveBoost)> =
            self.active.iter().map(|(k, b)| (*k, *b)).collect();
        boosts.sort_by_key(|(_, b)| b.activation_seq);
        boosts
    }

    /// Restore an active boost from a snapshot without touching the ledger.
    pub(crate) fn restore(&mut self, kind: BoostKind, multiplier: f64, expires_at: i64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.active.insert(
            kind,
            ActiveBoost {
                multiplier,
                expires_at,
                activation_seq: seq,
            },
        );
    }
}
