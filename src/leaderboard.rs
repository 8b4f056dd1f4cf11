//! Read-only rankings over a ledger snapshot.
//!
//! Sorting is stable and fully specified: descending by the chosen
//! metric (level ranks compare XP behind the level), with ties broken
//! by ascending user id so two calls over the same snapshot always
//! agree.

use crate::ledger::PlayerRecord;
use serde::{Deserialize, Serialize};

/// What to rank players by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cash,
    Level,
    Wins,
}

/// One row of a ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankEntry {
    pub user_id: String,
    pub value: i64,
}

fn sort_key(record: &PlayerRecord, metric: Metric) -> (i64, u64) {
    match metric {
        Metric::Cash => (record.cash, 0),
        // XP separates players on the same level, matching the way
        // level itself is earned.
        Metric::Level => (record.level as i64, record.xp),
        Metric::Wins => (record.wins as i64, 0),
    }
}

fn displayed_value(record: &PlayerRecord, metric: Metric) -> i64 {
    match metric {
        Metric::Cash => record.cash,
        Metric::Level => record.level as i64,
        Metric::Wins => record.wins as i64,
    }
}

/// Rank the users admitted by `scope`, best first.
pub fn rank(
    snapshot: &[(String, PlayerRecord)],
    metric: Metric,
    scope: impl Fn(&str) -> bool,
) -> Vec<RankEntry> {
    let mut rows: Vec<&(String, PlayerRecord)> = snapshot
        .iter()
        .filter(|(user_id, _)| scope(user_id))
        .collect();

    rows.sort_by(|(a_id, a), (b_id, b)| {
        sort_key(b, metric)
            .cmp(&sort_key(a, metric))
            .then_with(|| a_id.cmp(b_id))
    });

    rows.into_iter()
        .map(|(user_id, record)| RankEntry {
            user_id: user_id.clone(),
            value: displayed_value(record, metric),
        })
        .collect()
}

/// 1-based position of `user_id` in the ranking, `None` when the user
/// is outside the scope or the snapshot.
pub fn standing(
    snapshot: &[(String, PlayerRecord)],
    metric: Metric,
    scope: impl Fn(&str) -> bool,
    user_id: &str,
) -> Option<usize> {
    rank(snapshot, metric, scope)
        .iter()
        .position(|entry| entry.user_id == user_id)
        .map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(cash: i64, level: u32, xp: u64, wins: u64) -> PlayerRecord {
        let mut record = PlayerRecord::new(1000);
        record.cash = cash;
        record.level = level;
        record.xp = xp;
        record.wins = wins;
        record
    }

    fn snapshot() -> Vec<(String, PlayerRecord)> {
        vec![
            ("100".to_string(), player(500, 2, 2400, 9)),
            ("200".to_string(), player(5000, 1, 1100, 3)),
            ("300".to_string(), player(500, 2, 2900, 9)),
            ("400".to_string(), player(50, 0, 0, 0)),
        ]
    }

    #[test]
    fn cash_ranking_is_descending_with_id_tiebreak() {
        let rows = rank(&snapshot(), Metric::Cash, |_| true);
        let ids: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        // 100 and 300 tie on cash; the lower id ranks first.
        assert_eq!(ids, ["200", "100", "300", "400"]);
        assert_eq!(rows[0].value, 5000);
    }

    #[test]
    fn level_ranking_breaks_ties_by_xp() {
        let rows = rank(&snapshot(), Metric::Level, |_| true);
        let ids: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        // Both on level 2, but 300 has more XP.
        assert_eq!(ids, ["300", "100", "200", "400"]);
        assert_eq!(rows[0].value, 2);
    }

    #[test]
    fn scope_filters_before_ranking() {
        let members = ["100", "400"];
        let rows = rank(&snapshot(), Metric::Wins, |id| members.contains(&id));
        let ids: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, ["100", "400"]);
    }

    #[test]
    fn standing_is_one_based_and_scope_aware() {
        assert_eq!(standing(&snapshot(), Metric::Cash, |_| true, "400"), Some(4));
        assert_eq!(standing(&snapshot(), Metric::Cash, |_| true, "999"), None);
        assert_eq!(
            standing(&snapshot(), Metric::Cash, |id| id != "200", "100"),
            Some(1)
        );
    }

    #[test]
    fn ranking_tracks_snapshot_changes() {
        let mut snap = snapshot();
        assert_eq!(rank(&snap, Metric::Cash, |_| true)[0].user_id, "200");
        // 400 hits a jackpot; the next ranking reorders.
        snap[3].1.cash = 10_000;
        assert_eq!(rank(&snap, Metric::Cash, |_| true)[0].user_id, "400");
    }
}
