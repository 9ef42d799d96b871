//! Per-match decks.
//!
//! A `Deck` is filled once at deck selection and only ever shrinks. Draws
//! pick uniformly at random without replacement, so the stored order does
//! not matter for play; it is kept for reproducibility.
//!
//! Two constructors exist:
//!
//! - `build_player_deck` expands the provider's `(card, quantity)` entries
//!   in order until the capacity is reached.
//! - `synthesize_opponent_deck` samples the catalog per cost tier
//!   (with replacement) and shuffles the result.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardDefinition, CardInstance, CostTier};
use crate::core::config::OpponentDeckShape;
use crate::core::entity::{InstanceAllocator, InstanceId};
use crate::core::error::{EngineError, EngineResult};
use crate::core::rng::GameRng;
use crate::core::side::Side;

/// One line of a stored deck: a card and how many copies it contributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardDefinition,
    pub quantity: u32,
}

impl DeckEntry {
    #[must_use]
    pub fn new(card: CardDefinition, quantity: u32) -> Self {
        Self { card, quantity }
    }
}

/// A side's draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardInstance>,
    capacity: usize,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vector::new(),
            capacity,
        }
    }

    /// Create a deck from instances, dropping anything past `capacity`.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = CardInstance>, capacity: usize) -> Self {
        Self {
            cards: cards.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    /// Remove up to `n` cards chosen uniformly at random.
    ///
    /// Returns fewer than `n` cards when the deck runs short and an empty
    /// vector when it is already empty.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Vec<CardInstance> {
        let mut drawn = Vec::with_capacity(n.min(self.cards.len()));
        while drawn.len() < n {
            let Some(index) = rng.pick_index(self.cards.len()) else {
                break;
            };
            drawn.push(self.cards.remove(index));
        }
        log::debug!("drew {} of {} card(s), {} left", drawn.len(), n, self.cards.len());
        drawn
    }
}

/// Expand stored deck entries into fresh instances for `owner`.
///
/// Entries are walked in order, each contributing `quantity` copies, until
/// `capacity` cards exist. An empty result means the deck is unusable.
pub fn build_player_deck(
    entries: &[DeckEntry],
    owner: Side,
    capacity: usize,
    ids: &mut InstanceAllocator,
) -> EngineResult<Deck> {
    let mut cards = Vec::with_capacity(capacity);
    'entries: for entry in entries {
        for _ in 0..entry.quantity {
            if cards.len() >= capacity {
                break 'entries;
            }
            cards.push(CardInstance::new(ids.alloc(), entry.card.clone(), owner));
        }
    }

    if cards.is_empty() {
        return Err(EngineError::DataUnavailable("the selected deck has no cards".into()));
    }
    Ok(Deck::from_cards(cards, capacity))
}

/// Synthesize a balanced deck from the catalog.
///
/// Each tier contributes its quota, picked with replacement; an empty tier
/// contributes nothing. The result is shuffled.
pub fn synthesize_opponent_deck(
    catalog: &CardCatalog,
    shape: &OpponentDeckShape,
    capacity: usize,
    owner: Side,
    ids: &mut InstanceAllocator,
    rng: &mut GameRng,
) -> EngineResult<Deck> {
    let mut cards = Vec::with_capacity(shape.total());
    for tier in CostTier::ALL {
        let members = catalog.tier(tier, shape);
        if members.is_empty() {
            log::debug!("catalog has no {tier:?} tier cards");
            continue;
        }
        for _ in 0..tier.quota(shape) {
            if let Some(card) = rng.choose(&members) {
                cards.push(CardInstance::new(ids.alloc(), (*card).clone(), owner));
            }
        }
    }

    if cards.is_empty() {
        return Err(EngineError::DataUnavailable("the card catalog is empty".into()));
    }

    rng.shuffle(&mut cards);
    Ok(Deck::from_cards(cards, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn def(id: u32, cost: u32) -> CardDefinition {
        CardDefinition::new(CardId::new(id), format!("Card {id}"))
            .with_power(id)
            .with_cost(cost)
    }

    fn deck_of(n: u32) -> Deck {
        let mut ids = InstanceAllocator::new();
        let cards = (0..n).map(|i| CardInstance::new(ids.alloc(), def(i, 1), Side::Human));
        Deck::from_cards(cards, 20)
    }

    #[test]
    fn test_draw_removes_cards() {
        let mut deck = deck_of(10);
        let mut rng = GameRng::new(1);

        let drawn = deck.draw(3, &mut rng);

        assert_eq!(drawn.len(), 3);
        assert_eq!(deck.len(), 7);
        for card in &drawn {
            assert!(!deck.contains(card.id));
        }
    }

    #[test]
    fn test_short_draw() {
        let mut deck = deck_of(2);
        let mut rng = GameRng::new(1);

        assert_eq!(deck.draw(3, &mut rng).len(), 2);
        assert!(deck.is_empty());
        assert!(deck.draw(3, &mut rng).is_empty());
    }

    #[test]
    fn test_draw_is_seeded() {
        let mut a = deck_of(10);
        let mut b = deck_of(10);

        let ids_a: Vec<_> = a.draw(4, &mut GameRng::new(9)).iter().map(|c| c.id).collect();
        let ids_b: Vec<_> = b.draw(4, &mut GameRng::new(9)).iter().map(|c| c.id).collect();

        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_player_deck_respects_capacity() {
        let mut ids = InstanceAllocator::new();
        let entries = vec![DeckEntry::new(def(1, 1), 15), DeckEntry::new(def(2, 3), 10)];

        let deck = build_player_deck(&entries, Side::Human, 20, &mut ids).unwrap();

        assert_eq!(deck.len(), 20);
        assert_eq!(deck.iter().filter(|c| c.card_id() == CardId::new(1)).count(), 15);
        assert_eq!(deck.iter().filter(|c| c.card_id() == CardId::new(2)).count(), 5);
        assert!(deck.iter().all(|c| c.owner == Side::Human));
    }

    #[test]
    fn test_player_deck_unique_instances() {
        let mut ids = InstanceAllocator::new();
        let entries = vec![DeckEntry::new(def(1, 1), 3)];

        let deck = build_player_deck(&entries, Side::Human, 20, &mut ids).unwrap();

        let mut seen: Vec<_> = deck.iter().map(|c| c.id).collect();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_empty_player_deck_is_unavailable() {
        let mut ids = InstanceAllocator::new();
        let entries = vec![DeckEntry::new(def(1, 1), 0)];

        let err = build_player_deck(&entries, Side::Human, 20, &mut ids).unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_synthesized_deck_shape() {
        let catalog: CardCatalog = [def(1, 1), def(2, 2), def(3, 3), def(4, 4), def(5, 6)]
            .into_iter()
            .collect();
        let shape = OpponentDeckShape::default();
        let mut ids = InstanceAllocator::new();
        let mut rng = GameRng::new(5);

        let deck =
            synthesize_opponent_deck(&catalog, &shape, 20, Side::Opponent, &mut ids, &mut rng)
                .unwrap();

        assert_eq!(deck.len(), 20);
        let count = |tier| deck.iter().filter(|c| CostTier::of(c.cost(), &shape) == tier).count();
        assert_eq!(count(CostTier::Low), 8);
        assert_eq!(count(CostTier::Mid), 7);
        assert_eq!(count(CostTier::High), 5);
    }

    #[test]
    fn test_synthesized_deck_skips_empty_tier() {
        let catalog: CardCatalog = [def(1, 1)].into_iter().collect();
        let mut ids = InstanceAllocator::new();
        let mut rng = GameRng::new(5);

        let deck = synthesize_opponent_deck(
            &catalog,
            &OpponentDeckShape::default(),
            20,
            Side::Opponent,
            &mut ids,
            &mut rng,
        )
        .unwrap();

        assert_eq!(deck.len(), 8);
    }

    #[test]
    fn test_synthesize_from_empty_catalog() {
        let mut ids = InstanceAllocator::new();
        let mut rng = GameRng::new(5);

        let result = synthesize_opponent_deck(
            &CardCatalog::new(),
            &OpponentDeckShape::default(),
            20,
            Side::Opponent,
            &mut ids,
            &mut rng,
        );

        assert!(matches!(result, Err(EngineError::DataUnavailable(_))));
    }
}
