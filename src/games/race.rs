//! Animal race betting: pick the winning lane out of a fixed field.

use crate::errors::{EngineError, EngineResult};
use crate::games::types::{GameKind, Outcome, Settlement, SettlementDetail};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Race variants. Bigger fields pay longer odds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RaceField {
    Turtle,
    Dog,
    Horse,
    Dinosaur,
}

impl RaceField {
    /// Number of lanes in this race.
    pub fn lanes(&self) -> u32 {
        match self {
            RaceField::Turtle => 3,
            RaceField::Dog => 5,
            RaceField::Horse => 8,
            RaceField::Dinosaur => 12,
        }
    }

    /// Winning payout, profit per unit staked. Matches the field size.
    pub fn odds(&self) -> u64 {
        self.lanes() as u64
    }
}

impl fmt::Display for RaceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceField::Turtle => write!(f, "turtle"),
            RaceField::Dog => write!(f, "dog"),
            RaceField::Horse => write!(f, "horse"),
            RaceField::Dinosaur => write!(f, "dinosaur"),
        }
    }
}

pub(crate) fn resolve(
    bet: u64,
    field: RaceField,
    lane: u32,
    rng: &mut dyn RandomSource,
    xp_per_win: u64,
) -> EngineResult<Settlement> {
    if lane < 1 || lane > field.lanes() {
        return Err(EngineError::InvalidPrediction {
            value: lane,
            max: field.lanes(),
        });
    }

    let winner = rng.next_below(field.lanes() as u64) as u32 + 1;
    let (outcome, cash_delta) = if lane == winner {
        (Outcome::Win, (bet * field.odds()) as i64)
    } else {
        (Outcome::Loss, -(bet as i64))
    };

    Ok(Settlement::from_result(
        GameKind::Race,
        bet,
        outcome,
        cash_delta,
        xp_per_win,
        SettlementDetail::Race {
            field,
            lane,
            winner,
        },
    ))
}
