//! # lane-ccg
//!
//! A three-lane card battle engine: a human side against an automated
//! opponent, played over rounds of coin toss, draw, alternating placement
//! and two attack passes until a life total hits zero or a deck runs dry.
//!
//! ## Design Principles
//!
//! 1. **One state aggregate**: everything a match mutates lives in
//!    `MatchState`, and `MatchController` is its only writer.
//!
//! 2. **Validate, then mutate**: every command is checked in full before
//!    it touches state, so a rejection never leaves a half-applied move.
//!
//! 3. **Virtual time**: opponent turns and attack passes are scheduled
//!    continuations on a virtual clock. Tests settle them instantly; a
//!    presentation layer can drive them from a real timer. Forfeit drops
//!    whatever is still queued.
//!
//! 4. **Deterministic randomness**: draws, coin tosses, deck synthesis and
//!    opponent choices all use the seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: sides, identifiers, RNG, configuration, phases, commands,
//!   errors, match state
//! - `cards`: attributes, definitions, instances, catalog
//! - `zones`: deck, hand and retention, lanes
//! - `combat`: the attack-pass resolver and its events
//! - `policy`: opponent placement strategies
//! - `schedule`: virtual-clock continuation queue
//! - `stats`: match statistics
//! - `rules`: the match state machine, results and presentation view
//! - `provider`: card provider and reward sink contracts
//! - `session`: a match wired to its collaborators

pub mod core;
pub mod cards;
pub mod zones;
pub mod combat;
pub mod policy;
pub mod schedule;
pub mod stats;
pub mod rules;
pub mod provider;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    DeckId, InstanceId, UserId,
    GameRng,
    MatchConfig, Timings, LANE_COUNT,
    AttackStage, CoinFace, Outcome, Phase,
    Command, CommandRecord,
    EngineError, EngineResult,
    MatchState, SideState,
};

pub use crate::cards::{Attribute, AttributeSet, CardCatalog, CardDefinition, CardId, CardInstance};

pub use crate::zones::{Deck, DeckEntry, Hand, Lane, Lanes, Retention};

pub use crate::combat::{CombatEvent, CombatResolver, PassReport};

pub use crate::policy::{OpponentPolicy, Placement, RandomPolicy, StrongestFirstPolicy};

pub use crate::schedule::{Continuation, Scheduler};

pub use crate::stats::{MatchStats, StatsLedger};

pub use crate::rules::{EndReason, GameResult, MatchController, MatchView};

pub use crate::provider::{
    CardProvider, CardRecord, DeckCardRecord, InMemoryProvider, InMemoryWallet, RewardSink,
};

pub use crate::session::ArenaSession;
