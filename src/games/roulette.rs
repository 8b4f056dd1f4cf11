//! American roulette: 38 pockets (0-36 plus 00) and the standard
//! outside-bet menu.

use crate::games::types::{GameKind, Outcome, Settlement, SettlementDetail};
use crate::rng::RandomSource;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One slot on the wheel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Pocket {
    Number(u8),
    DoubleZero,
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pocket::Number(n) => write!(f, "{n}"),
            Pocket::DoubleZero => write!(f, "00"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PocketColor {
    Red,
    Black,
    Green,
}

/// The red half of the standard American layout; black is the rest of
/// 1-36, green is 0 and 00.
static RED_NUMBERS: Lazy<HashSet<u8>> = Lazy::new(|| {
    [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36]
        .into_iter()
        .collect()
});

impl Pocket {
    pub fn color(&self) -> PocketColor {
        match self {
            Pocket::DoubleZero | Pocket::Number(0) => PocketColor::Green,
            Pocket::Number(n) if RED_NUMBERS.contains(n) => PocketColor::Red,
            Pocket::Number(_) => PocketColor::Black,
        }
    }
}

/// A roulette wager. `FromStr` accepts the chat spellings: a bare
/// number, `00`, colors, `1sthalf`/`1st`, `2ndhalf`/`2nd`, and
/// `1st12`/`2nd12`/`3rd12`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouletteBet {
    Straight { pocket: Pocket },
    Red,
    Black,
    Green,
    LowHalf,
    HighHalf,
    FirstDozen,
    SecondDozen,
    ThirdDozen,
}

impl RouletteBet {
    /// Payout ratio (profit per unit staked) when the bet hits.
    pub fn payout_ratio(&self) -> u64 {
        match self {
            RouletteBet::Straight { .. } => 35,
            RouletteBet::Green => 17,
            RouletteBet::FirstDozen | RouletteBet::SecondDozen | RouletteBet::ThirdDozen => 2,
            RouletteBet::Red
            | RouletteBet::Black
            | RouletteBet::LowHalf
            | RouletteBet::HighHalf => 1,
        }
    }

    /// Does this bet cover the landed pocket? Range and color bets
    /// never cover the zero pockets; those pay only on `Straight` or
    /// `Green`.
    pub fn covers(&self, pocket: Pocket) -> bool {
        let number = match pocket {
            Pocket::Number(n) => Some(n),
            Pocket::DoubleZero => None,
        };
        match self {
            RouletteBet::Straight { pocket: called } => *called == pocket,
            RouletteBet::Red => pocket.color() == PocketColor::Red,
            RouletteBet::Black => pocket.color() == PocketColor::Black,
            RouletteBet::Green => pocket.color() == PocketColor::Green,
            RouletteBet::LowHalf => matches!(number, Some(n) if (1..=18).contains(&n)),
            RouletteBet::HighHalf => matches!(number, Some(n) if (19..=36).contains(&n)),
            RouletteBet::FirstDozen => matches!(number, Some(n) if (1..=12).contains(&n)),
            RouletteBet::SecondDozen => matches!(number, Some(n) if (13..=24).contains(&n)),
            RouletteBet::ThirdDozen => matches!(number, Some(n) if (25..=36).contains(&n)),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized roulette bet: {0}")]
pub struct ParseBetError(String);

impl FromStr for RouletteBet {
    type Err = ParseBetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bet = s.trim().to_lowercase();
        match bet.as_str() {
            "red" => return Ok(RouletteBet::Red),
            "black" => return Ok(RouletteBet::Black),
            "green" => return Ok(RouletteBet::Green),
            "1sthalf" | "1st" => return Ok(RouletteBet::LowHalf),
            "2ndhalf" | "2nd" => return Ok(RouletteBet::HighHalf),
            "1st12" => return Ok(RouletteBet::FirstDozen),
            "2nd12" => return Ok(RouletteBet::SecondDozen),
            "3rd12" => return Ok(RouletteBet::ThirdDozen),
            "00" => {
                return Ok(RouletteBet::Straight {
                    pocket: Pocket::DoubleZero,
                })
            }
            _ => {}
        }
        match bet.parse::<u8>() {
            Ok(n) if n <= 36 => Ok(RouletteBet::Straight {
                pocket: Pocket::Number(n),
            }),
            _ => Err(ParseBetError(bet)),
        }
    }
}

fn spin_wheel(rng: &mut dyn RandomSource) -> Pocket {
    match rng.next_below(38) {
        37 => Pocket::DoubleZero,
        n => Pocket::Number(n as u8),
    }
}

pub(crate) fn resolve(
    bet_amount: u64,
    bet: RouletteBet,
    rng: &mut dyn RandomSource,
    xp_per_win: u64,
) -> Settlement {
    let pocket = spin_wheel(rng);

    let (outcome, cash_delta) = if bet.covers(pocket) {
        (Outcome::Win, (bet_amount * bet.payout_ratio()) as i64)
    } else {
        (Outcome::Loss, -(bet_amount as i64))
    };

    Settlement::from_result(
        GameKind::Roulette,
        bet_amount,
        outcome,
        cash_delta,
        xp_per_win,
        SettlementDetail::Roulette {
            pocket,
            color: pocket.color(),
            bet,
        },
    )
}
