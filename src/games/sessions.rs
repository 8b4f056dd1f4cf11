//! Session store for live blackjack hands.
//!
//! Each open hand is keyed by a session id and owned by exactly one
//! player. Actions from anyone else are rejected, and a session that
//! sits idle past the inactivity window resolves as a forfeit. Removal
//! from the map is atomic, so a late action and a sweep can never both
//! settle the same hand.

use crate::config::{BlackjackConfig, EngineConfig};
use crate::errors::{EngineError, EngineResult};
use crate::games::blackjack::{Action, BlackjackHand, Deal, HandProgress, Mode, TableView};
use crate::games::types::Settlement;
use crate::rng::RandomSource;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

struct OpenSession {
    owner: String,
    hand: BlackjackHand,
    deadline: Instant,
}

/// Outcome of opening a hand at the table.
pub enum TableOpening {
    /// A natural settled the hand before any action was possible.
    Settled(Settlement),
    InPlay { id: Uuid, view: TableView },
}

/// Outcome of one action against an open session.
pub enum Turn {
    Continue(TableView),
    Settled(Settlement),
}

/// A forfeited session collected by [`SessionTable::sweep_expired`].
pub struct Forfeit {
    pub id: Uuid,
    pub owner: String,
    pub settlement: Settlement,
}

/// Concurrent table of open blackjack sessions.
pub struct SessionTable {
    sessions: DashMap<Uuid, OpenSession>,
    blackjack: BlackjackConfig,
    timeout: Duration,
    xp_per_win: u64,
}

impl SessionTable {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            blackjack: config.blackjack.clone(),
            timeout: config.session_timeout(),
            xp_per_win: config.economy.xp_per_win,
        }
    }

    /// Deal a hand for `owner`. Naturals settle immediately and never
    /// enter the table; otherwise the session is stored and its id
    /// returned for follow-up actions.
    pub fn open(
        &self,
        owner: &str,
        bet: u64,
        mode: Mode,
        rng: &mut dyn RandomSource,
    ) -> TableOpening {
        match BlackjackHand::deal(bet, mode, &self.blackjack, self.xp_per_win, rng) {
            Deal::Settled(settlement) => TableOpening::Settled(settlement),
            Deal::InPlay(hand) => {
                let id = Uuid::new_v4();
                let view = hand.view();
                self.sessions.insert(
                    id,
                    OpenSession {
                        owner: owner.to_string(),
                        hand,
                        deadline: Instant::now() + self.timeout,
                    },
                );
                debug!(session = %id, owner, bet, "blackjack session opened");
                TableOpening::InPlay { id, view }
            }
        }
    }

    /// Apply a hit or stand from `caller` to session `id`.
    ///
    /// An expired session is removed and settled as a forfeit even when
    /// the owner is the one knocking; the wager was already committed.
    pub fn act(&self, id: Uuid, caller: &str, action: Action) -> EngineResult<Turn> {
        // Ownership is checked before removal so a stranger's action
        // can't disturb the session.
        {
            let session = self
                .sessions
                .get(&id)
                .ok_or(EngineError::SessionNotFound(id))?;
            if session.owner != caller {
                return Err(EngineError::NotYourSession(id));
            }
        }

        let (_, session) = self
            .sessions
            .remove(&id)
            .ok_or(EngineError::SessionNotFound(id))?;

        if Instant::now() >= session.deadline {
            debug!(session = %id, "blackjack session expired before action");
            return Ok(Turn::Settled(session.hand.forfeit()));
        }

        match session.hand.play(action) {
            HandProgress::Settled(settlement) => Ok(Turn::Settled(settlement)),
            HandProgress::Continue(hand) => {
                let view = hand.view();
                self.sessions.insert(
                    id,
                    OpenSession {
                        owner: session.owner,
                        hand,
                        deadline: Instant::now() + self.timeout,
                    },
                );
                Ok(Turn::Continue(view))
            }
        }
    }

    /// Remove every expired session and return its forfeit settlement
    /// so the caller can apply it to the ledger.
    pub fn sweep_expired(&self) -> Vec<Forfeit> {
        let now = Instant::now();
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| now >= entry.deadline)
            .map(|entry| *entry.key())
            .collect();

        let mut forfeits = Vec::new();
        for id in expired {
            if let Some((_, session)) = self.sessions.remove(&id) {
                debug!(session = %id, owner = %session.owner, "sweeping expired session");
                forfeits.push(Forfeit {
                    id,
                    owner: session.owner,
                    settlement: session.hand.forfeit(),
                });
            }
        }
        forfeits
    }

    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}
