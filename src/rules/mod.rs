//! Match rules: the state machine that drives a match, its terminal
//! result and the presentation snapshot.
//!
//! `MatchController` is the single writer of `MatchState`. Commands are
//! validated in full before they touch anything; timed steps run through
//! the scheduler so the match can be driven by a real clock or settled
//! instantly in tests.

pub mod controller;
pub mod result;
pub mod view;

pub use controller::MatchController;
pub use result::{EndReason, GameResult};
pub use view::{CardFace, CardSummary, LaneView, MatchView, SideView};
