//! Core game vocabulary: kinds, parameters, outcomes, settlements.

use crate::games::blackjack::Card;
use crate::games::race::RaceField;
use crate::games::roulette::{Pocket, PocketColor, RouletteBet};
use crate::games::slots::SlotSymbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    CoinFlip,
    Dice,
    Slots,
    Roulette,
    Race,
    Blackjack,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::CoinFlip => write!(f, "coinflip"),
            GameKind::Dice => write!(f, "dice"),
            GameKind::Slots => write!(f, "slots"),
            GameKind::Roulette => write!(f, "roulette"),
            GameKind::Race => write!(f, "race"),
            GameKind::Blackjack => write!(f, "blackjack"),
        }
    }
}

/// Coin side, both the player's call and the landed result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

/// How a resolved game ended for the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

/// Per-game parameters for the single-call resolvers.
///
/// Blackjack is absent: it spans multiple interactions and runs through
/// [`crate::games::sessions::SessionTable`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameParams {
    CoinFlip { call: CoinSide },
    Dice { sides: u32, called: u32 },
    Slots,
    Roulette { bet: RouletteBet },
    Race { field: RaceField, lane: u32 },
}

impl GameParams {
    pub fn kind(&self) -> GameKind {
        match self {
            GameParams::CoinFlip { .. } => GameKind::CoinFlip,
            GameParams::Dice { .. } => GameKind::Dice,
            GameParams::Slots => GameKind::Slots,
            GameParams::Roulette { .. } => GameKind::Roulette,
            GameParams::Race { .. } => GameKind::Race,
        }
    }
}

/// The computed result of one resolved game.
///
/// Pure data: the resolver that produced it has already drawn its
/// randomness, and the ledger applies it as a single atomic mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub game: GameKind,
    pub outcome: Outcome,
    /// Signed change to the player's cash. Never below `-bet`.
    pub cash_delta: i64,
    /// XP granted for the result; zero unless the player won.
    pub xp_award: u64,
    /// Added to the lifetime wagered counter.
    pub total_bet_delta: u64,
    /// Gross amount handed back on a win (stake included); zero otherwise.
    pub total_won_delta: u64,
    /// Game-specific payload for the presentation layer.
    pub detail: SettlementDetail,
}

/// Game-specific result payload, opaque to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum SettlementDetail {
    CoinFlip {
        call: CoinSide,
        landed: CoinSide,
    },
    Dice {
        sides: u32,
        called: u32,
        rolled: u32,
    },
    Slots {
        reels: [SlotSymbol; 3],
        hit: Option<SlotHit>,
    },
    Roulette {
        pocket: Pocket,
        color: PocketColor,
        bet: RouletteBet,
    },
    Race {
        field: RaceField,
        lane: u32,
        winner: u32,
    },
    Blackjack {
        player: Vec<Card>,
        dealer: Vec<Card>,
        player_total: u8,
        dealer_total: u8,
        conclusion: HandConclusion,
    },
}

/// A winning slot line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotHit {
    pub symbol: SlotSymbol,
    /// 3 for a triple, 2 for a pair.
    pub count: u8,
    pub payout_ratio: u64,
}

/// How a blackjack hand concluded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandConclusion {
    PlayerNatural,
    DealerNatural,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    Push,
    /// Session timed out; the wager is forfeited.
    Forfeited,
}

impl Settlement {
    /// Assemble a settlement under the uniform accounting policy:
    /// lifetime wagered always grows by the stake, the won counter
    /// records the gross return (stake plus profit) on a win only, and
    /// XP is granted on wins only.
    pub(crate) fn from_result(
        game: GameKind,
        bet: u64,
        outcome: Outcome,
        cash_delta: i64,
        xp_per_win: u64,
        detail: SettlementDetail,
    ) -> Self {
        let (xp_award, total_won_delta) = match outcome {
            Outcome::Win => (xp_per_win, (bet as i64 + cash_delta) as u64),
            Outcome::Loss | Outcome::Push => (0, 0),
        };
        Self {
            game,
            outcome,
            cash_delta,
            xp_award,
            total_bet_delta: bet,
            total_won_delta,
            detail,
        }
    }
}
