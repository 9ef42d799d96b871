//! Hands and the one-card retention slot.

use serde::{Deserialize, Serialize};

use super::deck::Deck;
use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;

/// Cards a side may place this round. Order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardInstance>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        self.cards.extend(cards);
    }

    /// Remove a card by instance ID.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.swap_remove(index))
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    /// Cards whose cost fits in `mana`.
    pub fn affordable(&self, mana: u32) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter().filter(move |c| c.is_affordable(mana))
    }

    /// Empty the hand, returning what it held.
    pub fn clear(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }

    /// Draw `owed` cards from `deck` into this hand.
    pub fn refill(&mut self, deck: &mut Deck, owed: usize, rng: &mut GameRng) -> DrawReport {
        let drawn = deck.draw(owed, rng);
        let report = DrawReport {
            owed,
            drawn: drawn.len(),
            deck_left: deck.len(),
        };
        self.extend(drawn);
        report
    }
}

/// Outcome of a round draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    pub owed: usize,
    pub drawn: usize,
    pub deck_left: usize,
}

impl DrawReport {
    /// A draw was owed and nothing came back.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.owed > 0 && self.drawn == 0
    }

    /// Fewer cards came back than were owed.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.drawn < self.owed
    }
}

/// The single card carried over between rounds.
///
/// ```
/// use lane_ccg::zones::Retention;
///
/// let retention = Retention::new();
/// assert_eq!(retention.draw_count(3), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retention {
    held: Option<CardInstance>,
}

impl Retention {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a card aside. A second card is handed back untouched.
    pub fn hold(&mut self, card: CardInstance) -> Result<(), CardInstance> {
        if self.held.is_some() {
            return Err(card);
        }
        self.held = Some(card);
        Ok(())
    }

    /// Release the held card into the next hand.
    pub fn take(&mut self) -> Option<CardInstance> {
        self.held.take()
    }

    #[must_use]
    pub fn held(&self) -> Option<&CardInstance> {
        self.held.as_ref()
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Cards owed by the next draw: one fewer while a card is held.
    #[must_use]
    pub fn draw_count(&self, base: usize) -> usize {
        if self.is_holding() {
            base.saturating_sub(1)
        } else {
            base
        }
    }
}
