//! Card catalog for definition lookup and cost tiers.
//!
//! The `CardCatalog` holds every card the provider knows about. It is the
//! source the opponent deck is synthesized from, so it also sorts cards
//! into cost tiers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use crate::core::config::OpponentDeckShape;

/// Cost bracket used when synthesizing a balanced deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostTier {
    Low,
    Mid,
    High,
}

impl CostTier {
    pub const ALL: [CostTier; 3] = [CostTier::Low, CostTier::Mid, CostTier::High];

    /// Classify a cost against the deck shape's tier bounds.
    #[must_use]
    pub fn of(cost: u32, shape: &OpponentDeckShape) -> Self {
        if cost <= shape.low_max_cost {
            CostTier::Low
        } else if cost <= shape.mid_max_cost {
            CostTier::Mid
        } else {
            CostTier::High
        }
    }

    /// Number of cards the shape asks for from this tier.
    #[must_use]
    pub fn quota(self, shape: &OpponentDeckShape) -> usize {
        match self {
            CostTier::Low => shape.low,
            CostTier::Mid => shape.mid,
            CostTier::High => shape.high,
        }
    }
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(CardId::new(1), "Ember Imp").with_cost(1));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Ember Imp");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, returning any definition it replaced.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.id, card)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Cards of one cost tier, sorted by ID so synthesis is reproducible.
    #[must_use]
    pub fn tier(&self, tier: CostTier, shape: &OpponentDeckShape) -> Vec<&CardDefinition> {
        let mut members: Vec<_> = self
            .cards
            .values()
            .filter(|c| CostTier::of(c.cost, shape) == tier)
            .collect();
        members.sort_by_key(|c| c.id);
        members
    }
}

impl FromIterator<CardDefinition> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.register(card);
        }
        catalog
    }
}
