//! Lanes: the three board slots of each side.
//!
//! A lane holds at most one card, whether that card is still face-down,
//! how many attacks it has blocked (meaningful only for Guards) and the
//! round it was placed in (retraction is limited to the current round).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::cards::CardInstance;
use crate::core::config::LANE_COUNT;
use crate::core::entity::InstanceId;

/// One board slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    card: Option<CardInstance>,
    face_down: bool,
    guard_blocks: u8,
    placed_round: u32,
}

impl Lane {
    #[must_use]
    pub fn card(&self) -> Option<&CardInstance> {
        self.card.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face_down
    }

    #[must_use]
    pub fn guard_blocks(&self) -> u8 {
        self.guard_blocks
    }

    #[must_use]
    pub fn placed_round(&self) -> u32 {
        self.placed_round
    }

    /// Put a card into an empty lane. An occupied lane hands the card back.
    pub fn place(
        &mut self,
        card: CardInstance,
        face_down: bool,
        round: u32,
    ) -> Result<(), CardInstance> {
        if self.card.is_some() {
            return Err(card);
        }
        self.card = Some(card);
        self.face_down = face_down;
        self.guard_blocks = 0;
        self.placed_round = round;
        Ok(())
    }

    /// Remove the card and reset the lane.
    pub fn take(&mut self) -> Option<CardInstance> {
        let card = self.card.take();
        *self = Self::default();
        card
    }

    pub fn reveal(&mut self) {
        self.face_down = false;
    }

    pub fn set_guard_blocks(&mut self, blocks: u8) {
        self.guard_blocks = blocks;
    }
}

/// A side's three lanes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lanes {
    lanes: [Lane; LANE_COUNT],
}

impl Lanes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Lane> {
        self.lanes.get_mut(index)
    }

    /// The card in a lane, if the lane exists and is occupied.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardInstance> {
        self.lanes.get(index).and_then(Lane::card)
    }

    /// Indices of empty lanes, left to right.
    #[must_use]
    pub fn open_lanes(&self) -> SmallVec<[usize; LANE_COUNT]> {
        self.iter()
            .filter(|(_, lane)| lane.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.lanes.iter().filter(|l| !l.is_empty()).count()
    }

    /// Index of the lane holding a given card.
    #[must_use]
    pub fn find(&self, id: InstanceId) -> Option<usize> {
        self.lanes
            .iter()
            .position(|l| l.card().is_some_and(|c| c.id == id))
    }

    /// Turn every card face-up.
    pub fn reveal_all(&mut self) {
        for lane in &mut self.lanes {
            lane.reveal();
        }
    }

    /// Copy of the cards as they stand, for snapshot-based resolution.
    #[must_use]
    pub fn snapshot(&self) -> [Option<CardInstance>; LANE_COUNT] {
        std::array::from_fn(|i| self.lanes[i].card.clone())
    }

    /// Current Guard block counts per lane.
    #[must_use]
    pub fn guard_counts(&self) -> [u8; LANE_COUNT] {
        std::array::from_fn(|i| self.lanes[i].guard_blocks)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Lane)> {
        self.lanes.iter().enumerate()
    }

    /// Cards currently on the board.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.lanes.iter().filter_map(Lane::card)
    }
}

impl Index<usize> for Lanes {
    type Output = Lane;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lanes[index]
    }
}

impl IndexMut<usize> for Lanes {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.lanes[index]
    }
}
