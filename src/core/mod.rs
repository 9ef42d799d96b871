//! Core engine types: sides, identifiers, RNG, configuration, phases,
//! commands, errors and the match state aggregate.

pub mod side;
pub mod entity;
pub mod rng;
pub mod config;
pub mod phase;
pub mod command;
pub mod error;
pub mod state;

pub use side::{Side, SideMap};
pub use entity::{DeckId, InstanceAllocator, InstanceId, UserId};
pub use rng::GameRng;
pub use config::{ConfigError, MatchConfig, OpponentDeckShape, Timings, LANE_COUNT};
pub use phase::{AttackStage, CoinFace, Outcome, Phase};
pub use command::{Command, CommandRecord};
pub use error::{EngineError, EngineResult};
pub use state::{MatchState, SideState};
