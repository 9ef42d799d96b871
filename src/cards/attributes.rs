//! Card attributes as a closed bit set.
//!
//! A card carries any subset of `{Guard, Thief, Curse}`. Membership is
//! fixed when the card is instantiated, so combat branches on a set of
//! flags rather than looking up names.
//!
//! - `Guard`: attacks only into an empty lane; blocks attackers in its own
//!   or an adjacent lane until it retires at the block cap.
//! - `Thief`: strikes the opponent's life directly unless a Guard is in range.
//! - `Curse`: when destroyed, damages the opponent of its owner.

use serde::{Deserialize, Serialize};

/// A single card attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Guard,
    Thief,
    Curse,
}

impl Attribute {
    /// All attributes in display order.
    pub const ALL: [Attribute; 3] = [Attribute::Guard, Attribute::Thief, Attribute::Curse];

    const fn bit(self) -> u8 {
        match self {
            Attribute::Guard => 0b001,
            Attribute::Thief => 0b010,
            Attribute::Curse => 0b100,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Guard => write!(f, "Guard"),
            Attribute::Thief => write!(f, "Thief"),
            Attribute::Curse => write!(f, "Curse"),
        }
    }
}

/// Set of attributes on one card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSet(u8);

impl AttributeSet {
    /// No attributes.
    pub const EMPTY: Self = Self(0);

    /// Build from the three boolean flags used by card records.
    #[must_use]
    pub const fn from_flags(guard: bool, thief: bool, curse: bool) -> Self {
        let mut bits = 0;
        if guard {
            bits |= Attribute::Guard.bit();
        }
        if thief {
            bits |= Attribute::Thief.bit();
        }
        if curse {
            bits |= Attribute::Curse.bit();
        }
        Self(bits)
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub const fn with(self, attribute: Attribute) -> Self {
        Self(self.0 | attribute.bit())
    }

    /// Add an attribute in place.
    pub fn insert(&mut self, attribute: Attribute) {
        self.0 |= attribute.bit();
    }

    #[must_use]
    pub const fn contains(self, attribute: Attribute) -> bool {
        self.0 & attribute.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_guard(self) -> bool {
        self.contains(Attribute::Guard)
    }

    #[must_use]
    pub const fn is_thief(self) -> bool {
        self.contains(Attribute::Thief)
    }

    #[must_use]
    pub const fn is_curse(self) -> bool {
        self.contains(Attribute::Curse)
    }

    /// Iterate over the attributes present.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl std::fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}
