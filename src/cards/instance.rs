//! Card instances - per-match copies of catalog cards.
//!
//! Each copy has a fresh `InstanceId` and remembers which side owns it.
//! The definition is cloned and never mutated during the match; mutable
//! lane state (face-down flag, Guard block count) lives on the `Lane`.

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeSet};
use super::definition::{CardDefinition, CardId};
use crate::core::entity::InstanceId;
use crate::core::side::Side;

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique per-match ID.
    pub id: InstanceId,

    /// The side this copy belongs to.
    pub owner: Side,

    /// Cloned catalog data.
    pub definition: CardDefinition,
}

impl CardInstance {
    /// Clone a catalog entry into a match.
    #[must_use]
    pub fn new(id: InstanceId, definition: CardDefinition, owner: Side) -> Self {
        Self {
            id,
            owner,
            definition,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.definition.cost
    }

    /// Raw power.
    #[must_use]
    pub fn power(&self) -> u32 {
        self.definition.power
    }

    /// Combat power (at least 1).
    #[must_use]
    pub fn attack_power(&self) -> u32 {
        self.definition.attack_power()
    }

    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.definition.attributes
    }

    #[must_use]
    pub fn has(&self, attribute: Attribute) -> bool {
        self.definition.attributes.contains(attribute)
    }

    #[must_use]
    pub fn is_guard(&self) -> bool {
        self.definition.attributes.is_guard()
    }

    #[must_use]
    pub fn is_thief(&self) -> bool {
        self.definition.attributes.is_thief()
    }

    #[must_use]
    pub fn is_curse(&self) -> bool {
        self.definition.attributes.is_curse()
    }

    /// Check if the owner can pay for this card.
    #[must_use]
    pub fn is_affordable(&self, mana: u32) -> bool {
        self.cost() <= mana
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard_curse() -> CardDefinition {
        CardDefinition::new(CardId::new(3), "Hexed Warden")
            .with_power(2)
            .with_cost(4)
            .with_attribute(Attribute::Guard)
            .with_attribute(Attribute::Curse)
    }

    #[test]
    fn test_instance_accessors() {
        let card = CardInstance::new(InstanceId(9), guard_curse(), Side::Opponent);

        assert_eq!(card.id, InstanceId(9));
        assert_eq!(card.card_id(), CardId::new(3));
        assert_eq!(card.owner, Side::Opponent);
        assert_eq!(card.name(), "Hexed Warden");
        assert_eq!(card.attack_power(), 2);
        assert!(card.is_guard());
        assert!(card.is_curse());
        assert!(!card.is_thief());
        assert!(card.has(Attribute::Curse));
    }

    #[test]
    fn test_affordable() {
        let card = CardInstance::new(InstanceId(0), guard_curse(), Side::Human);

        assert!(card.is_affordable(4));
        assert!(card.is_affordable(10));
        assert!(!card.is_affordable(3));
    }

    #[test]
    fn test_copies_are_distinct() {
        let a = CardInstance::new(InstanceId(0), guard_curse(), Side::Human);
        let b = CardInstance::new(InstanceId(1), guard_curse(), Side::Human);

        assert_eq!(a.card_id(), b.card_id());
        assert_ne!(a, b);
    }
}
