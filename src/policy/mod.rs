//! Opponent placement strategies.
//!
//! The controller asks an `OpponentPolicy` for one decision per opponent
//! turn and validates it like any other placement; an illegal answer is
//! logged and treated as a pass.

pub mod random;
pub mod strongest;

use smallvec::SmallVec;

use crate::cards::CardInstance;
use crate::core::config::LANE_COUNT;
use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;
use crate::zones::Hand;

pub use random::RandomPolicy;
pub use strongest::StrongestFirstPolicy;

/// What the opponent may look at when deciding.
#[derive(Clone, Debug)]
pub struct PlacementView<'a> {
    pub hand: &'a Hand,
    pub mana: u32,
    pub open_lanes: SmallVec<[usize; LANE_COUNT]>,
    pub round: u32,
}

impl<'a> PlacementView<'a> {
    /// Cards the opponent can pay for right now.
    pub fn affordable(&self) -> impl Iterator<Item = &'a CardInstance> {
        self.hand.affordable(self.mana)
    }
}

/// A single opponent decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Place { card: InstanceId, lane: usize },
    Pass,
}

/// Strategy for opponent turns.
pub trait OpponentPolicy: Send + Sync {
    /// Pick a placement for the current turn.
    fn choose(&self, view: &PlacementView<'_>, rng: &mut GameRng) -> Placement;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
