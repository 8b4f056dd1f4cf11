//! Error types for the betline engine.
//!
//! Bet and prediction problems are rejected synchronously, before any
//! randomness is drawn or state is touched. Storage failures live in
//! [`crate::store::StoreError`] and are swallowed-and-logged by the
//! ledger rather than surfaced here.

use uuid::Uuid;

/// Errors visible to the command layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Wager was zero, negative, or unparseable.
    #[error("bet must be a positive amount")]
    InvalidBet,

    /// Wager exceeds the player's current balance.
    #[error("bet of {bet} exceeds available cash {cash}")]
    InsufficientCash { bet: i64, cash: i64 },

    /// Game parameter outside its valid domain.
    #[error("prediction {value} is outside 1..={max}")]
    InvalidPrediction { value: u32, max: u32 },

    /// No blackjack session with this id (unknown, settled, or swept).
    #[error("no active session {0}")]
    SessionNotFound(Uuid),

    /// Blackjack action from someone other than the session owner.
    #[error("session {0} belongs to another player")]
    NotYourSession(Uuid),

    /// Reward claimed before its cooldown elapsed.
    #[error("reward on cooldown for another {remaining_secs}s")]
    CooldownActive { remaining_secs: u64 },
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = EngineError::InsufficientCash { bet: 5000, cash: 120 };
        assert!(err.to_string().contains("5000"));
        assert!(err.to_string().contains("120"));

        let err = EngineError::InvalidPrediction { value: 9, max: 6 };
        assert!(err.to_string().contains("1..=6"));
    }
}
