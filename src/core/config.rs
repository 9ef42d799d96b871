//! Match configuration.
//!
//! Every rule constant lives in `MatchConfig`. Defaults reproduce the
//! standard rule set (life 100, Guard block cap 3); a JSON document can
//! override any subset of fields:
//!
//! ```
//! use lane_ccg::core::MatchConfig;
//!
//! let config = MatchConfig::from_json(r#"{ "starting_life": 40 }"#).unwrap();
//! assert_eq!(config.starting_life, 40);
//! assert_eq!(config.guard_block_cap, 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lanes per side. Never resized.
pub const LANE_COUNT: usize = 3;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed match config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid match config: {0}")]
    Invalid(String),
}

/// Shape of the synthesized opponent deck.
///
/// Cards are sorted into tiers by cost: `cost <= low_max_cost` is low,
/// `cost <= mid_max_cost` is mid, everything else is high.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentDeckShape {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
    pub low_max_cost: u32,
    pub mid_max_cost: u32,
}

impl Default for OpponentDeckShape {
    fn default() -> Self {
        Self {
            low: 8,
            mid: 7,
            high: 5,
            low_max_cost: 2,
            mid_max_cost: 4,
        }
    }
}

impl OpponentDeckShape {
    /// Total cards requested across tiers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.mid + self.high
    }
}

/// Virtual-clock delays, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Opponent's opening turn of a round.
    pub opponent_first_turn_ms: u64,
    /// Every later opponent turn.
    pub opponent_turn_ms: u64,
    /// Placement complete until the battle reveal.
    pub battle_start_ms: u64,
    /// Reveal until the first pass, and between passes.
    pub attack_pass_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            opponent_first_turn_ms: 1500,
            opponent_turn_ms: 1000,
            battle_start_ms: 1000,
            attack_pass_ms: 1500,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Life each side starts with.
    pub starting_life: u32,

    /// Mana in round 1; grows by one per round.
    pub starting_mana: u32,

    /// Mana never scales past this.
    pub max_mana: u32,

    /// Placement turns per side per round.
    pub turns_per_round: u8,

    /// Cards drawn per round (one fewer when a card is retained).
    pub hand_draw: usize,

    /// Upper bound on deck size.
    pub max_deck_size: usize,

    /// Blocks a Guard makes before retiring.
    pub guard_block_cap: u8,

    /// Gems granted on victory.
    pub victory_gems: u32,

    /// Messages kept in the presentation view.
    pub message_window: usize,

    pub opponent_deck: OpponentDeckShape,

    pub timings: Timings,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: 100,
            starting_mana: 4,
            max_mana: 10,
            turns_per_round: 3,
            hand_draw: 3,
            max_deck_size: 20,
            guard_block_cap: 3,
            victory_gems: 30,
            message_window: 8,
            opponent_deck: OpponentDeckShape::default(),
            timings: Timings::default(),
        }
    }
}

impl MatchConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.guard_block_cap == 0 {
            return Err(ConfigError::Invalid("guard_block_cap must be at least 1".into()));
        }
        if self.hand_draw == 0 {
            return Err(ConfigError::Invalid("hand_draw must be at least 1".into()));
        }
        if self.turns_per_round == 0 {
            return Err(ConfigError::Invalid("turns_per_round must be at least 1".into()));
        }
        if usize::from(self.turns_per_round) > LANE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "turns_per_round ({}) cannot exceed the {} lanes",
                self.turns_per_round, LANE_COUNT
            )));
        }
        if self.starting_mana > self.max_mana {
            return Err(ConfigError::Invalid(format!(
                "starting_mana ({}) exceeds max_mana ({})",
                self.starting_mana, self.max_mana
            )));
        }
        if self.max_deck_size == 0 {
            return Err(ConfigError::Invalid("max_deck_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Mana both sides receive at the start of `round` (1-based).
    #[must_use]
    pub fn mana_for_round(&self, round: u32) -> u32 {
        let grown = self.starting_mana.saturating_add(round.saturating_sub(1));
        grown.min(self.max_mana)
    }

    #[must_use]
    pub fn with_starting_life(mut self, life: u32) -> Self {
        self.starting_life = life;
        self
    }

    #[must_use]
    pub fn with_guard_block_cap(mut self, cap: u8) -> Self {
        self.guard_block_cap = cap;
        self
    }

    #[must_use]
    pub fn with_hand_draw(mut self, draw: usize) -> Self {
        self.hand_draw = draw;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, starting: u32, max: u32) -> Self {
        self.starting_mana = starting;
        self.max_mana = max;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::new();

        assert_eq!(config.starting_life, 100);
        assert_eq!(config.guard_block_cap, 3);
        assert_eq!(config.opponent_deck.total(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mana_scaling() {
        let config = MatchConfig::new();

        assert_eq!(config.mana_for_round(1), 4);
        assert_eq!(config.mana_for_round(2), 5);
        assert_eq!(config.mana_for_round(7), 10);
        assert_eq!(config.mana_for_round(30), 10);
    }

    #[test]
    fn test_partial_json_override() {
        let config = MatchConfig::from_json(
            r#"{ "guard_block_cap": 2, "timings": { "attack_pass_ms": 10 } }"#,
        )
        .unwrap();

        assert_eq!(config.guard_block_cap, 2);
        assert_eq!(config.timings.attack_pass_ms, 10);
        assert_eq!(config.timings.opponent_turn_ms, 1000);
        assert_eq!(config.starting_life, 100);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(MatchConfig::new().with_guard_block_cap(0).validate().is_err());
        assert!(MatchConfig::new().with_hand_draw(0).validate().is_err());
        assert!(MatchConfig::new().with_mana(11, 10).validate().is_err());

        let mut config = MatchConfig::new();
        config.turns_per_round = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_turns_rejected() {
        let err = MatchConfig::from_json(r#"{ "turns_per_round": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = MatchConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
