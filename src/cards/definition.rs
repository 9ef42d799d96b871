//! Card definitions - static catalog data.
//!
//! `CardDefinition` holds the immutable properties of a catalog card.
//! Per-match copies are `CardInstance`s.

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeSet};

/// Catalog identifier of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{Attribute, CardDefinition, CardId};
///
/// let sentry = CardDefinition::new(CardId::new(1), "Stone Sentry")
///     .with_power(2)
///     .with_cost(3)
///     .with_attribute(Attribute::Guard);
///
/// assert!(sentry.attributes.is_guard());
/// assert_eq!(sentry.attack_power(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    pub name: String,

    /// Raw power; may be zero.
    pub power: u32,

    /// Mana cost to place.
    pub cost: u32,

    /// Image reference, passed through to the presentation layer.
    pub image: Option<String>,

    pub attributes: AttributeSet,
}

impl CardDefinition {
    /// Create a definition with zero power and cost and no attributes.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            power: 0,
            cost: 0,
            image: None,
            attributes: AttributeSet::EMPTY,
        }
    }

    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Power used in combat: an unset or zero power still counts as 1.
    #[must_use]
    pub fn attack_power(&self) -> u32 {
        self.power.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_builder() {
        let card = CardDefinition::new(CardId::new(7), "Night Cutpurse")
            .with_power(4)
            .with_cost(3)
            .with_image("cards/cutpurse.png")
            .with_attribute(Attribute::Thief);

        assert_eq!(card.name, "Night Cutpurse");
        assert_eq!(card.power, 4);
        assert_eq!(card.cost, 3);
        assert_eq!(card.image.as_deref(), Some("cards/cutpurse.png"));
        assert!(card.attributes.is_thief());
        assert!(!card.attributes.is_guard());
    }

    #[test]
    fn test_zero_power_attacks_for_one() {
        let card = CardDefinition::new(CardId::new(1), "Wisp");
        assert_eq!(card.power, 0);
        assert_eq!(card.attack_power(), 1);
    }

    #[test]
    fn test_serialization() {
        let card = CardDefinition::new(CardId::new(1), "Test")
            .with_cost(2)
            .with_attribute(Attribute::Curse);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
