//! The economy ledger: sole owner of player records.
//!
//! Every consumer shares one `Ledger` instance; nothing else holds a
//! record across calls. Mutations for the same user are serialized by a
//! per-user gate, and the whole-document rewrite is serialized by a
//! single save gate, so concurrent settlements can neither lose an
//! update nor interleave file writes. Persistence failures are logged
//! and swallowed: this economy prefers staying available over being
//! durable.

use crate::config::{EconomyConfig, EngineConfig, RewardConfig};
use crate::errors::EngineResult;
use crate::games::types::{Outcome, Settlement};
use crate::leveling;
use crate::rewards::{self, RewardGrant};
use crate::rng::RandomSource;
use crate::store::{RecordMap, RecordStore};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, warn};

/// One player's economy record. Created lazily on first lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub cash: i64,
    /// Derived: always `xp / xp_per_level`. Recomputed on every XP
    /// mutation, never set directly.
    pub level: u32,
    pub xp: u64,
    pub wins: u64,
    pub losses: u64,
    /// Lifetime amount wagered, independent of current cash.
    pub total_bet: u64,
    /// Lifetime gross amount returned by winning games.
    pub total_won: u64,
    #[serde(default)]
    pub last_daily: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_work: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    pub fn new(starting_cash: i64) -> Self {
        Self {
            cash: starting_cash,
            level: 0,
            xp: 0,
            wins: 0,
            losses: 0,
            total_bet: 0,
            total_won: 0,
            last_daily: None,
            last_work: None,
        }
    }
}

/// A settlement folded into a record, plus whether it leveled the
/// player up.
#[derive(Debug, Clone)]
pub struct AppliedSettlement {
    pub record: PlayerRecord,
    pub leveled_up: bool,
}

/// A reward claim folded into a record.
#[derive(Debug, Clone)]
pub struct ClaimedReward {
    pub grant: RewardGrant,
    pub record: PlayerRecord,
}

pub struct Ledger {
    economy: EconomyConfig,
    rewards: RewardConfig,
    records: RwLock<RecordMap>,
    /// Per-user mutation gates. Entries are created on demand and kept
    /// for the ledger's lifetime.
    gates: DashMap<String, Arc<Mutex<()>>>,
    /// Serializes whole-document rewrites.
    save_gate: Mutex<()>,
    store: Box<dyn RecordStore>,
}

impl Ledger {
    /// Load the backing document and stand up the ledger. A failed load
    /// is logged and the ledger starts empty rather than refusing to
    /// serve.
    pub async fn open(config: &EngineConfig, store: Box<dyn RecordStore>) -> Self {
        let records = match store.load().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "failed to load player records, starting empty");
                RecordMap::new()
            }
        };
        Self {
            economy: config.economy.clone(),
            rewards: config.rewards.clone(),
            records: RwLock::new(records),
            gates: DashMap::new(),
            save_gate: Mutex::new(()),
            store,
        }
    }

    fn gate(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.gates
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fetch a player's record, creating it with the starting balance
    /// on first lookup. Returns a copy; records never leave the ledger
    /// by reference.
    pub async fn get_or_create(&self, user_id: &str) -> PlayerRecord {
        if let Some(record) = self.records.read().await.get(user_id) {
            return record.clone();
        }
        let mut records = self.records.write().await;
        records
            .entry(user_id.to_string())
            .or_insert_with(|| PlayerRecord::new(self.economy.starting_cash))
            .clone()
    }

    /// Fold a settlement into the player's record: one atomic mutation
    /// covering cash, win/loss counters, lifetime totals, and XP, then
    /// a persist.
    pub async fn apply(&self, user_id: &str, settlement: &Settlement) -> AppliedSettlement {
        let gate = self.gate(user_id);
        let _guard = gate.lock().await;

        let (record, leveled_up) = {
            let mut records = self.records.write().await;
            let record = records
                .entry(user_id.to_string())
                .or_insert_with(|| PlayerRecord::new(self.economy.starting_cash));

            record.cash += settlement.cash_delta;
            match settlement.outcome {
                Outcome::Win => record.wins += 1,
                Outcome::Loss => record.losses += 1,
                Outcome::Push => {}
            }
            record.total_bet += settlement.total_bet_delta;
            record.total_won += settlement.total_won_delta;
            let leveled_up = if settlement.xp_award > 0 {
                leveling::award_xp(record, settlement.xp_award, self.economy.xp_per_level)
            } else {
                false
            };
            (record.clone(), leveled_up)
        };

        self.persist().await;
        AppliedSettlement { record, leveled_up }
    }

    /// Claim the daily reward for a player.
    pub async fn claim_daily(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<ClaimedReward> {
        let gate = self.gate(user_id);
        let _guard = gate.lock().await;

        let claimed = {
            let mut records = self.records.write().await;
            let record = records
                .entry(user_id.to_string())
                .or_insert_with(|| PlayerRecord::new(self.economy.starting_cash));
            let grant = rewards::claim_daily(record, now, &self.rewards)?;
            ClaimedReward {
                grant,
                record: record.clone(),
            }
        };

        self.persist().await;
        Ok(claimed)
    }

    /// Claim a work shift for a player.
    pub async fn claim_work(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<ClaimedReward> {
        let gate = self.gate(user_id);
        let _guard = gate.lock().await;

        let claimed = {
            let mut records = self.records.write().await;
            let record = records
                .entry(user_id.to_string())
                .or_insert_with(|| PlayerRecord::new(self.economy.starting_cash));
            let grant = rewards::claim_work(record, now, &self.rewards, rng)?;
            ClaimedReward {
                grant,
                record: record.clone(),
            }
        };

        self.persist().await;
        Ok(claimed)
    }

    /// Copy of every record, for read-only views like the leaderboard.
    pub async fn snapshot(&self) -> Vec<(String, PlayerRecord)> {
        self.records
            .read()
            .await
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// Rewrite the backing document. Failures are logged and swallowed;
    /// the in-memory state stays authoritative.
    pub async fn persist(&self) {
        let _guard = self.save_gate.lock().await;
        let records = self.records.read().await.clone();
        if let Err(e) = self.store.save(&records).await {
            warn!(error = %e, "failed to persist player records, continuing in memory");
        }
    }
}
