//! Match phases and their terminal outcomes.
//!
//! ```text
//! Init -> CoinToss -> (Draw) -> Placement -> Battle(First) -> Battle(Second)
//!      -> RoundEnd -> CoinToss -> Draw -> ...            -> GameOver(outcome)
//! ```
//!
//! Round 1 skips `Draw` because the opening hands are dealt at deck
//! selection.

use serde::{Deserialize, Serialize};

/// Which of the two attack passes of a battle is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackStage {
    /// The coin-toss winner attacks.
    First,
    /// The coin-toss loser attacks.
    Second,
}

/// Terminal outcome, from the human side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    DeckExhausted,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Victory => write!(f, "victory"),
            Outcome::Defeat => write!(f, "defeat"),
            Outcome::DeckExhausted => write!(f, "deck exhausted"),
        }
    }
}

/// Result of a coin toss. Heads puts the human side first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

/// Match phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a deck.
    Init,
    /// Waiting for the human to confirm the round's coin toss.
    CoinToss,
    /// Both sides draw for the round.
    Draw,
    /// Sides alternate single-card placements.
    Placement,
    /// Attack passes.
    Battle(AttackStage),
    /// Waiting for the human's retention choice.
    RoundEnd,
    /// Terminal.
    GameOver(Outcome),
}

impl Phase {
    /// Check if the match has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    /// Check if forfeiting is accepted in this phase.
    #[must_use]
    pub const fn accepts_forfeit(self) -> bool {
        matches!(self, Phase::Placement | Phase::Battle(_))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Init => write!(f, "init"),
            Phase::CoinToss => write!(f, "coin toss"),
            Phase::Draw => write!(f, "draw"),
            Phase::Placement => write!(f, "placement"),
            Phase::Battle(AttackStage::First) => write!(f, "battle (first attack)"),
            Phase::Battle(AttackStage::Second) => write!(f, "battle (second attack)"),
            Phase::RoundEnd => write!(f, "round end"),
            Phase::GameOver(outcome) => write!(f, "game over ({outcome})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_and_forfeit() {
        assert!(Phase::GameOver(Outcome::Victory).is_terminal());
        assert!(!Phase::Placement.is_terminal());

        assert!(Phase::Placement.accepts_forfeit());
        assert!(Phase::Battle(AttackStage::Second).accepts_forfeit());
        assert!(!Phase::RoundEnd.accepts_forfeit());
        assert!(!Phase::GameOver(Outcome::Defeat).accepts_forfeit());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Phase::CoinToss), "coin toss");
        assert_eq!(
            format!("{}", Phase::GameOver(Outcome::DeckExhausted)),
            "game over (deck exhausted)"
        );
    }
}
