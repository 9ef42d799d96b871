//! Presentation snapshot of a match.
//!
//! `MatchView` is what the presentation layer renders. Face-down cards
//! are masked as `CardFace::Hidden`, so an opponent placement reveals
//! nothing until the battle reveal.

use serde::{Deserialize, Serialize};

use super::result::GameResult;
use crate::cards::{AttributeSet, CardId, CardInstance};
use crate::combat::PassReport;
use crate::core::config::LANE_COUNT;
use crate::core::entity::InstanceId;
use crate::core::phase::{CoinFace, Phase};
use crate::core::side::Side;
use crate::core::state::SideState;
use crate::zones::Lane;

/// Public face of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: InstanceId,
    pub card_id: CardId,
    pub name: String,
    pub power: u32,
    pub cost: u32,
    pub image: Option<String>,
    pub attributes: AttributeSet,
}

impl From<&CardInstance> for CardSummary {
    fn from(card: &CardInstance) -> Self {
        Self {
            id: card.id,
            card_id: card.card_id(),
            name: card.name().to_string(),
            power: card.power(),
            cost: card.cost(),
            image: card.definition.image.clone(),
            attributes: card.attributes(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Visible(CardSummary),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneView {
    pub card: Option<CardFace>,
    pub guard_blocks: u8,
}

impl From<&Lane> for LaneView {
    fn from(lane: &Lane) -> Self {
        let card = lane.card().map(|c| {
            if lane.is_face_down() {
                CardFace::Hidden
            } else {
                CardFace::Visible(c.into())
            }
        });
        Self {
            card,
            guard_blocks: lane.guard_blocks(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub life: u32,
    pub mana: u32,
    pub deck_size: usize,
    pub hand_size: usize,
    pub turns_taken: u8,
    pub lanes: [LaneView; LANE_COUNT],
}

impl From<&SideState> for SideView {
    fn from(side: &SideState) -> Self {
        Self {
            life: side.life,
            mana: side.mana,
            deck_size: side.deck.len(),
            hand_size: side.hand.len(),
            turns_taken: side.turns_taken,
            lanes: std::array::from_fn(|i| LaneView::from(&side.lanes[i])),
        }
    }
}

/// Everything the presentation layer shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub phase: Phase,
    pub round: u32,
    pub coin_toss: Option<CoinFace>,
    pub active: Side,
    pub human: SideView,
    pub opponent: SideView,
    /// The human hand, face-up.
    pub hand: Vec<CardSummary>,
    pub retained: Option<CardSummary>,
    /// Most recent messages, oldest first.
    pub messages: Vec<String>,
    /// Attack passes of the current round.
    pub passes: Vec<PassReport>,
    pub result: Option<GameResult>,
    /// Scheduled steps not yet run.
    pub pending_steps: usize,
    /// Virtual clock, in milliseconds.
    pub clock_ms: u64,
}

impl MatchView {
    /// The view of one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideView {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.opponent,
        }
    }
}
