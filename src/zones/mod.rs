//! Where cards live during a match.
//!
//! ## Key Types
//!
//! - `Deck`: capped draw pile with uniform random draws
//! - `Hand`: the cards a side can place this round
//! - `Retention`: the single card carried into the next round
//! - `Lanes`: three board slots with face-down and Guard block state

pub mod deck;
pub mod hand;
pub mod lane;

pub use deck::{build_player_deck, synthesize_opponent_deck, Deck, DeckEntry};
pub use hand::{DrawReport, Hand, Retention};
pub use lane::{Lane, Lanes};
