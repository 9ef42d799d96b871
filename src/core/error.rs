//! Engine error taxonomy.
//!
//! Every rejection is synchronous and leaves the match untouched; the
//! `Display` text is meant to be shown to the player as-is. Deck
//! exhaustion is deliberately absent: it ends the match instead of failing
//! a command.

use thiserror::Error;

use super::entity::InstanceId;
use super::phase::Phase;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Reasons a command or lookup is refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Deck or catalog could not be obtained, or came back empty.
    #[error("card data unavailable: {0}")]
    DataUnavailable(String),

    #[error("cannot {command} during {phase}")]
    WrongPhase { command: &'static str, phase: Phase },

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("all {0} placements for this round are used")]
    TurnsExhausted(u8),

    #[error("lane {0} does not exist")]
    LaneOutOfRange(usize),

    #[error("lane {0} is already occupied")]
    LaneOccupied(usize),

    #[error("lane {0} is empty")]
    LaneEmpty(usize),

    /// Only cards placed this round can be taken back.
    #[error("the card in lane {0} was placed in an earlier round")]
    RetractLocked(usize),

    #[error("not enough mana to play this card (need {need}, have {have})")]
    InsufficientMana { need: u32, have: u32 },

    #[error("{0} is not in your hand")]
    CardNotInHand(InstanceId),

    #[error("{0} cannot be retained")]
    NotRetainable(InstanceId),

    #[error("a card is already retained")]
    AlreadyRetained,

    /// Phase-advancing commands wait for queued continuations.
    #[error("busy: {0} scheduled step(s) still pending")]
    Busy(usize),

    #[error("the match is over")]
    MatchOver,
}

impl EngineError {
    /// Check if the error comes from missing external data rather than a
    /// rule violation.
    #[must_use]
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, EngineError::DataUnavailable(_))
    }
}
