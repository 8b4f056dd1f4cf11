//! Daily and work reward claims with cooldown gating.
//!
//! Rewards adjust cash only; they never touch XP or the win/loss
//! counters. The daily reward resets at UTC midnight, work on a rolling
//! window. Both checks refuse without mutating the record.

use crate::config::RewardConfig;
use crate::errors::{EngineError, EngineResult};
use crate::ledger::PlayerRecord;
use crate::rng::RandomSource;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A paid-out reward claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardGrant {
    pub base: i64,
    pub level_bonus: i64,
    pub total: i64,
    pub new_balance: i64,
}

/// Time left before the daily reward can be claimed again, `None` when
/// it is claimable. One claim per UTC calendar day.
pub fn daily_cooldown_remaining(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let last = last?;
    if last.date_naive() != now.date_naive() {
        return None;
    }
    let next_midnight = last
        .date_naive()
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    Some(next_midnight - now)
}

/// Time left on the rolling work cooldown, `None` when claimable.
pub fn work_cooldown_remaining(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<Duration> {
    let last = last?;
    let elapsed = now - last;
    if elapsed >= window {
        None
    } else {
        Some(window - elapsed)
    }
}

fn cooldown_error(remaining: Duration) -> EngineError {
    EngineError::CooldownActive {
        remaining_secs: remaining.num_seconds().max(0) as u64,
    }
}

/// Claim the daily reward: base amount plus a per-level bonus.
pub fn claim_daily(
    record: &mut PlayerRecord,
    now: DateTime<Utc>,
    config: &RewardConfig,
) -> EngineResult<RewardGrant> {
    if let Some(remaining) = daily_cooldown_remaining(record.last_daily, now) {
        return Err(cooldown_error(remaining));
    }

    let level_bonus = config.daily_level_bonus * record.level as i64;
    let total = config.daily_base + level_bonus;
    record.cash += total;
    record.last_daily = Some(now);

    Ok(RewardGrant {
        base: config.daily_base,
        level_bonus,
        total,
        new_balance: record.cash,
    })
}

/// Claim a work shift: uniform draw in the configured range plus a
/// per-level bonus.
pub fn claim_work(
    record: &mut PlayerRecord,
    now: DateTime<Utc>,
    config: &RewardConfig,
    rng: &mut dyn RandomSource,
) -> EngineResult<RewardGrant> {
    let window = Duration::seconds(config.work_cooldown_secs as i64);
    if let Some(remaining) = work_cooldown_remaining(record.last_work, now, window) {
        return Err(cooldown_error(remaining));
    }

    let span = (config.work_max - config.work_min) as u64 + 1;
    let base = config.work_min + rng.next_below(span) as i64;
    let level_bonus = config.work_level_bonus * record.level as i64;
    let total = base + level_bonus;
    record.cash += total;
    record.last_work = Some(now);

    Ok(RewardGrant {
        base,
        level_bonus,
        total,
        new_balance: record.cash,
    })
}
