//! Betline - Virtual-Economy Gambling Engine
//!
//! The core of a chat-platform gambling bot: a player ledger, a wager
//! parser, and settlement resolvers for coinflip, dice, slots,
//! roulette, race betting, and session-based blackjack. The
//! presentation layer (commands, embeds, buttons) lives elsewhere and
//! talks to this crate through plain calls: parse and validate a bet,
//! resolve a game against an injected randomness source, then apply the
//! returned settlement to the ledger.

pub mod bet;
pub mod config;
pub mod errors;
pub mod games;
pub mod leaderboard;
pub mod ledger;
pub mod leveling;
pub mod rewards;
pub mod rng;
pub mod store;

pub use bet::{parse_bet, validate_bet};
pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult};
pub use games::blackjack::{Action, Mode};
pub use games::{
    GameKind, GameParams, Outcome, Resolver, SessionTable, Settlement, SettlementDetail,
    TableOpening, Turn,
};
pub use leaderboard::{rank, standing, Metric};
pub use ledger::{AppliedSettlement, ClaimedReward, Ledger, PlayerRecord};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
