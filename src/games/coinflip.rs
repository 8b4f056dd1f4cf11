//! Coin flip: one uniform two-way draw, even money.

use crate::games::types::{CoinSide, GameKind, Outcome, Settlement, SettlementDetail};
use crate::rng::RandomSource;

pub(crate) fn resolve(
    bet: u64,
    call: CoinSide,
    rng: &mut dyn RandomSource,
    xp_per_win: u64,
) -> Settlement {
    let landed = if rng.next_below(2) == 0 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };

    let (outcome, cash_delta) = if call == landed {
        (Outcome::Win, bet as i64)
    } else {
        (Outcome::Loss, -(bet as i64))
    };

    Settlement::from_result(
        GameKind::CoinFlip,
        bet,
        outcome,
        cash_delta,
        xp_per_win,
        SettlementDetail::CoinFlip { call, landed },
    )
}
