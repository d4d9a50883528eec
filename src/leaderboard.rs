//! Read-only leaderboard client.
//!
//! An external ranking service queried by category. Failures surface to
//! the caller as [`EngineError::LeaderboardUnavailable`]; presentation
//! treats that as an empty board and the engine never stops over it.

use crate::core::constants::{HTTP_USER_AGENT, REMOTE_TIMEOUT_SECONDS};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::Duration;

/// Which metric a ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardCategory {
    Coins,
    Clicks,
    Tier,
    Ascensions,
}

impl LeaderboardCategory {
    /// All categories in display order.
    pub const ALL: [LeaderboardCategory; 4] = [
        LeaderboardCategory::Coins,
        LeaderboardCategory::Clicks,
        LeaderboardCategory::Tier,
        LeaderboardCategory::Ascensions,
    ];

    /// Query-string key for the ranking service.
    pub fn key(&self) -> &'static str {
        match self {
            LeaderboardCategory::Coins => "coins",
            LeaderboardCategory::Clicks => "clicks",
            LeaderboardCategory::Tier => "tier",
            LeaderboardCategory::Ascensions => "ascensions",
        }
    }
}

/// One ranked player summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub metric_value: f64,
}

/// A service that can rank players by category.
pub trait LeaderboardSource {
    /// Ranked players, descending by the category's metric.
    fn query(&self, category: LeaderboardCategory)
        -> Result<Vec<LeaderboardEntry>, EngineError>;
}

/// HTTP-backed leaderboard client.
pub struct HttpLeaderboardClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpLeaderboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECONDS))
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }
}

impl LeaderboardSource for HttpLeaderboardClient {
    fn query(
        &self,
        category: LeaderboardCategory,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let url = format!("{}/leaderboard?category={}", self.base_url, category.key());
        let mut entries: Vec<LeaderboardEntry> = self
            .agent
            .get(&url)
            .set("User-Agent", HTTP_USER_AGENT)
            .call()
            .map_err(|err| EngineError::LeaderboardUnavailable(err.to_string()))?
            .into_json()
            .map_err(|err| EngineError::LeaderboardUnavailable(err.to_string()))?;

        // The contract says descending; enforce it rather than trust it.
        entries.sort_by(|a, b| {
            b.metric_value
                .partial_cmp(&a.metric_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(entries)
    }
}

/// Fixed in-memory rankings for tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
    unreachable: Cell<bool>,
}

impl MemoryLeaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries,
            unreachable: Cell::new(false),
        }
    }

    /// Simulate a service outage.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.set(unreachable);
    }
}

impl LeaderboardSource for MemoryLeaderboard {
    fn query(
        &self,
        _category: LeaderboardCategory,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        if self.unreachable.get() {
            return Err(EngineError::LeaderboardUnavailable(
                "memory leaderboard unreachable".to_string(),
            ));
        }
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            b.metric_value
                .partial_cmp(&a.metric_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(entries)
    }
}
