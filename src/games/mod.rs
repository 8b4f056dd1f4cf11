//! Game resolution: one resolver per game kind.
//!
//! The stateless games (everything but blackjack) resolve in a single
//! call through [`Resolver::resolve`]. Blackjack spans multiple
//! interactions and runs through [`sessions::SessionTable`].

pub mod blackjack;
pub mod coinflip;
pub mod dice;
pub mod race;
pub mod roulette;
pub mod sessions;
pub mod slots;
pub mod types;

pub use sessions::{SessionTable, TableOpening, Turn};
pub use types::{GameKind, GameParams, Outcome, Settlement, SettlementDetail};

use crate::config::EconomyConfig;
use crate::errors::EngineResult;
use crate::rng::RandomSource;

/// Resolves single-call games into settlements.
///
/// Pure apart from the injected randomness: parameters are validated
/// before the first draw, and nothing here touches the ledger. The
/// caller applies the returned settlement.
pub struct Resolver {
    economy: EconomyConfig,
}

impl Resolver {
    pub fn new(economy: EconomyConfig) -> Self {
        Self { economy }
    }

    /// Resolve a validated bet for one of the stateless games.
    pub fn resolve(
        &self,
        params: &GameParams,
        bet: u64,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<Settlement> {
        let xp = self.economy.xp_per_win;
        match params {
            GameParams::CoinFlip { call } => Ok(coinflip::resolve(bet, *call, rng, xp)),
            GameParams::Dice { sides, called } => dice::resolve(bet, *sides, *called, rng, xp),
            GameParams::Slots => Ok(slots::resolve(bet, rng, xp)),
            GameParams::Roulette { bet: wager } => Ok(roulette::resolve(bet, *wager, rng, xp)),
            GameParams::Race { field, lane } => race::resolve(bet, *field, *lane, rng, xp),
        }
    }
}
