//! Match state: one aggregate for everything a match mutates.
//!
//! ## SideState
//!
//! Per-side resources: life, mana, hand, deck, lanes and the number of
//! placement turns taken this round.
//!
//! ## MatchState
//!
//! Phase, round, coin toss, whose turn it is, both sides, the retained
//! card, the stats ledger, the message stream and the command history.
//! The controller is the only writer.

use im::Vector;

use super::command::{Command, CommandRecord};
use super::config::MatchConfig;
use super::entity::InstanceAllocator;
use super::error::{EngineError, EngineResult};
use super::phase::{CoinFace, Phase};
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::combat::PassReport;
use crate::stats::StatsLedger;
use crate::zones::{Deck, Hand, Lanes, Retention};

/// One side's resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideState {
    /// Never below 0.
    pub life: u32,

    pub mana: u32,

    pub hand: Hand,

    pub deck: Deck,

    pub lanes: Lanes,

    /// Placement turns used this round, passes included.
    pub turns_taken: u8,
}

impl SideState {
    #[must_use]
    pub fn new(life: u32, mana: u32, deck_capacity: usize) -> Self {
        Self {
            life,
            mana,
            hand: Hand::new(),
            deck: Deck::new(deck_capacity),
            lanes: Lanes::new(),
            turns_taken: 0,
        }
    }

    /// Remove life, clamping at 0. Returns the life actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.life);
        self.life -= lost;
        lost
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.life == 0
    }

    /// Pay a card cost.
    pub fn spend(&mut self, cost: u32) -> EngineResult<()> {
        if cost > self.mana {
            return Err(EngineError::InsufficientMana {
                need: cost,
                have: self.mana,
            });
        }
        self.mana -= cost;
        Ok(())
    }

    pub fn refund(&mut self, cost: u32) {
        self.mana += cost;
    }

    #[must_use]
    pub fn turns_left(&self, per_round: u8) -> u8 {
        per_round.saturating_sub(self.turns_taken)
    }
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    // === Progression ===
    pub phase: Phase,

    /// Starts at 1.
    pub round: u32,

    /// This round's toss; `None` until the first toss.
    pub coin_toss: Option<CoinFace>,

    /// Side whose placement turn it is.
    pub active: Side,

    // === Sides ===
    pub sides: SideMap<SideState>,

    /// The human's card carried into the next round.
    pub retention: Retention,

    // === Reporting ===
    pub stats: StatsLedger,

    /// Attack passes of the current round.
    pub round_reports: Vec<PassReport>,

    /// Every user-facing message, oldest first.
    pub messages: Vector<String>,

    /// Applied commands.
    pub history: Vector<CommandRecord>,

    sequence: u32,

    // === Randomness and identity ===
    pub rng: GameRng,

    pub ids: InstanceAllocator,
}

impl MatchState {
    /// Fresh state in `Init`, both sides at full life and round-1 mana.
    #[must_use]
    pub fn new(config: &MatchConfig, seed: u64) -> Self {
        let side = SideState::new(
            config.starting_life,
            config.mana_for_round(1),
            config.max_deck_size,
        );
        Self {
            phase: Phase::Init,
            round: 1,
            coin_toss: None,
            active: Side::Human,
            sides: SideMap::with_value(side),
            retention: Retention::new(),
            stats: StatsLedger::new(),
            round_reports: Vec::new(),
            messages: Vector::new(),
            history: Vector::new(),
            sequence: 0,
            rng: GameRng::new(seed),
            ids: InstanceAllocator::new(),
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    /// The side that places first and attacks first this round.
    #[must_use]
    pub fn first_attacker(&self) -> Side {
        match self.coin_toss {
            Some(CoinFace::Tails) => Side::Opponent,
            _ => Side::Human,
        }
    }

    /// Append to the message stream.
    pub fn push_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.messages.push_back(message);
    }

    /// Record an applied command.
    pub fn record(&mut self, side: Side, command: Command) {
        self.history
            .push_back(CommandRecord::new(side, command, self.round, self.sequence));
        self.sequence += 1;
    }

    /// The last `n` messages, oldest first.
    #[must_use]
    pub fn recent_messages(&self, n: usize) -> Vec<String> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }
}
