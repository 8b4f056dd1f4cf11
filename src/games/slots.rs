//! Three-reel slot machine with a weighted symbol table.
//!
//! Payouts are gross: a winning spin returns `bet * ratio`, so the net
//! cash change is `payout - bet`. A pair of stars pays 1:1, which wins
//! the spin but moves no cash.

use crate::games::types::{GameKind, Outcome, Settlement, SettlementDetail, SlotHit};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reel symbols, rarest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotSymbol {
    Diamond,
    Cherry,
    Orange,
    Grapes,
    Bell,
    Star,
}

impl fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSymbol::Diamond => write!(f, "diamond"),
            SlotSymbol::Cherry => write!(f, "cherry"),
            SlotSymbol::Orange => write!(f, "orange"),
            SlotSymbol::Grapes => write!(f, "grapes"),
            SlotSymbol::Bell => write!(f, "bell"),
            SlotSymbol::Star => write!(f, "star"),
        }
    }
}

/// Selection weight and payout ratios for one symbol.
struct ReelEntry {
    symbol: SlotSymbol,
    weight: u64,
    payout_3: u64,
    payout_2: u64,
}

/// The machine's fixed reel table. Heavier symbols land more often and
/// pay less.
static REEL: [ReelEntry; 6] = [
    ReelEntry { symbol: SlotSymbol::Diamond, weight: 1, payout_3: 500, payout_2: 25 },
    ReelEntry { symbol: SlotSymbol::Cherry, weight: 2, payout_3: 25, payout_2: 10 },
    ReelEntry { symbol: SlotSymbol::Orange, weight: 3, payout_3: 5, payout_2: 3 },
    ReelEntry { symbol: SlotSymbol::Grapes, weight: 4, payout_3: 3, payout_2: 2 },
    ReelEntry { symbol: SlotSymbol::Bell, weight: 5, payout_3: 2, payout_2: 1 },
    ReelEntry { symbol: SlotSymbol::Star, weight: 6, payout_3: 1, payout_2: 1 },
];

fn entry(symbol: SlotSymbol) -> &'static ReelEntry {
    REEL.iter()
        .find(|e| e.symbol == symbol)
        .expect("symbol present in reel table")
}

fn spin_reel(rng: &mut dyn RandomSource) -> SlotSymbol {
    let weights: Vec<u64> = REEL.iter().map(|e| e.weight).collect();
    REEL[rng.pick_weighted(&weights)].symbol
}

/// Find the winning line, triples before pairs. Pairs are scanned at
/// positions (0,1), (1,2), (0,2); with three reels at most one distinct
/// pair can exist.
fn winning_line(reels: &[SlotSymbol; 3]) -> Option<SlotHit> {
    if reels[0] == reels[1] && reels[1] == reels[2] {
        return Some(SlotHit {
            symbol: reels[0],
            count: 3,
            payout_ratio: entry(reels[0]).payout_3,
        });
    }
    for (a, b) in [(0, 1), (1, 2), (0, 2)] {
        if reels[a] == reels[b] {
            return Some(SlotHit {
                symbol: reels[a],
                count: 2,
                payout_ratio: entry(reels[a]).payout_2,
            });
        }
    }
    None
}

pub(crate) fn resolve(bet: u64, rng: &mut dyn RandomSource, xp_per_win: u64) -> Settlement {
    let reels = [spin_reel(rng), spin_reel(rng), spin_reel(rng)];
    let hit = winning_line(&reels);

    let (outcome, cash_delta) = match hit {
        Some(line) => {
            let payout = bet * line.payout_ratio;
            (Outcome::Win, payout as i64 - bet as i64)
        }
        None => (Outcome::Loss, -(bet as i64)),
    };

    Settlement::from_result(
        GameKind::Slots,
        bet,
        outcome,
        cash_delta,
        xp_per_win,
        SettlementDetail::Slots { reels, hit },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    // Cumulative weight ranges over the 21-slot wheel:
    // diamond 0, cherry 1..3, orange 3..6, grapes 6..10, bell 10..15,
    // star 15..21.
    const DIAMOND: u64 = 0;
    const CHERRY: u64 = 1;
    const ORANGE: u64 = 3;
    const BELL: u64 = 10;
    const STAR: u64 = 15;

    #[test]
    fn triple_pays_the_big_ratio_net_of_stake() {
        let mut rng = ScriptedRandom::new([DIAMOND, DIAMOND, DIAMOND]);
        let settlement = resolve(10, &mut rng, 100);
        assert_eq!(settlement.outcome, Outcome::Win);
        assert_eq!(settlement.cash_delta, 10 * 500 - 10);
        match settlement.detail {
            SettlementDetail::Slots { hit: Some(hit), .. } => {
                assert_eq!(hit.symbol, SlotSymbol::Diamond);
                assert_eq!(hit.count, 3);
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn split_pair_on_outer_reels_still_wins() {
        let mut rng = ScriptedRandom::new([CHERRY, ORANGE, CHERRY]);
        let settlement = resolve(10, &mut rng, 100);
        assert_eq!(settlement.outcome, Outcome::Win);
        // Cherry pair pays 10:1 gross.
        assert_eq!(settlement.cash_delta, 100 - 10);
    }

    #[test]
    fn star_pair_wins_without_moving_cash() {
        let mut rng = ScriptedRandom::new([STAR, STAR, BELL]);
        let settlement = resolve(10, &mut rng, 100);
        assert_eq!(settlement.outcome, Outcome::Win);
        assert_eq!(settlement.cash_delta, 0);
        assert_eq!(settlement.total_won_delta, 10);
        assert_eq!(settlement.xp_award, 100);
    }

    #[test]
    fn three_distinct_symbols_lose_the_stake() {
        let mut rng = ScriptedRandom::new([DIAMOND, CHERRY, ORANGE]);
        let settlement = resolve(10, &mut rng, 100);
        assert_eq!(settlement.outcome, Outcome::Loss);
        assert_eq!(settlement.cash_delta, -10);
        match settlement.detail {
            SettlementDetail::Slots { hit, .. } => assert!(hit.is_none()),
            other => panic!("unexpected detail {other:?}"),
        }
    }
}
