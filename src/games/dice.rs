//! Dice: call a face on a d4..d100, win pays `sides:1`.

use crate::errors::{EngineError, EngineResult};
use crate::games::types::{GameKind, Outcome, Settlement, SettlementDetail};
use crate::rng::RandomSource;

/// Die sizes the table offers.
pub const SUPPORTED_SIDES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

pub(crate) fn resolve(
    bet: u64,
    sides: u32,
    called: u32,
    rng: &mut dyn RandomSource,
    xp_per_win: u64,
) -> EngineResult<Settlement> {
    if !SUPPORTED_SIDES.contains(&sides) {
        return Err(EngineError::InvalidPrediction {
            value: sides,
            max: 100,
        });
    }
    if called < 1 || called > sides {
        return Err(EngineError::InvalidPrediction {
            value: called,
            max: sides,
        });
    }

    let rolled = rng.next_below(sides as u64) as u32 + 1;
    let (outcome, cash_delta) = if called == rolled {
        (Outcome::Win, (bet * sides as u64) as i64)
    } else {
        (Outcome::Loss, -(bet as i64))
    };

    Ok(Settlement::from_result(
        GameKind::Dice,
        bet,
        outcome,
        cash_delta,
        xp_per_win,
        SettlementDetail::Dice {
            sides,
            called,
            rolled,
        },
    ))
}
