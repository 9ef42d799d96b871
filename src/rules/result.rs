//! Terminal match result.

use serde::{Deserialize, Serialize};

use crate::core::phase::Outcome;
use crate::core::side::Side;
use crate::stats::MatchStats;

/// Why the match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A life total reached 0.
    LifeDepleted,
    /// The human side gave up.
    Forfeit,
    /// This side owed a draw and its deck was empty.
    DeckExhausted(Side),
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::LifeDepleted => write!(f, "life depleted"),
            EndReason::Forfeit => write!(f, "forfeit"),
            EndReason::DeckExhausted(side) => write!(f, "{} deck exhausted", side.possessive()),
        }
    }
}

/// Outcome of a finished match, as handed to the reward collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub reason: EndReason,
    /// Human life at the end.
    pub final_life: u32,
    pub enemy_final_life: u32,
    pub stats: MatchStats,
    /// Gems owed for this match (non-zero only on victory).
    pub gems_earned: u32,
}

impl GameResult {
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Victory
    }

    /// One-line summary for the message stream.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.outcome {
            Outcome::Victory => format!(
                "Victory! You won in {} round(s) and earned {} gems.",
                self.stats.rounds_played, self.gems_earned
            ),
            Outcome::Defeat if self.reason == EndReason::Forfeit => {
                "You forfeited the match.".to_string()
            }
            Outcome::Defeat => "You have been defeated!".to_string(),
            Outcome::DeckExhausted => format!("Match over: {}.", self.reason),
        }
    }
}
