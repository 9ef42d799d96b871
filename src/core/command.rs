//! Commands accepted from the presentation layer.
//!
//! A `Command` is an intent; the controller validates it against the
//! current phase and either applies it or returns an `EngineError`.
//! Applied commands are appended to the match history as
//! `CommandRecord`s, which makes a match replayable from its seed.

use serde::{Deserialize, Serialize};

use super::entity::{DeckId, InstanceId};
use super::side::Side;

/// A player intent.
///
/// ## Example
///
/// ```
/// use lane_ccg::core::{Command, InstanceId};
///
/// let place = Command::PlaceCard { card: InstanceId(4), lane: 1 };
/// assert!(place.advances_phase());
/// assert!(!Command::Forfeit.advances_phase());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    SelectDeck { deck_id: DeckId },
    ConfirmCoinToss,
    PlaceCard { card: InstanceId, lane: usize },
    /// Take back a card placed this round (placement phase only).
    RetractCard { lane: usize },
    PassTurn,
    RetainCard { card: InstanceId },
    SkipRetain,
    Forfeit,
}

impl Command {
    /// Short verb phrase used in rejection messages.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Command::SelectDeck { .. } => "select a deck",
            Command::ConfirmCoinToss => "confirm the coin toss",
            Command::PlaceCard { .. } => "place a card",
            Command::RetractCard { .. } => "retract a card",
            Command::PassTurn => "pass",
            Command::RetainCard { .. } => "retain a card",
            Command::SkipRetain => "skip retention",
            Command::Forfeit => "forfeit",
        }
    }

    /// Whether the command must wait for pending scheduled steps.
    ///
    /// Forfeit cancels them instead.
    #[must_use]
    pub const fn advances_phase(&self) -> bool {
        !matches!(self, Command::Forfeit)
    }
}

/// An applied command with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub side: Side,
    pub command: Command,
    pub round: u32,
    /// Global sequence number, starting at 0.
    pub sequence: u32,
}

impl CommandRecord {
    #[must_use]
    pub fn new(side: Side, command: Command, round: u32, sequence: u32) -> Self {
        Self {
            side,
            command,
            round,
            sequence,
        }
    }
}
