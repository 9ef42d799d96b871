//! External collaborators: where cards come from and where rewards go.
//!
//! The engine never owns storage. A `CardProvider` answers "what is in
//! this user's deck" and "what cards exist", in the wire shape stored
//! decks use; a `RewardSink` persists the victory reward. In-memory
//! implementations back the tests and any embedding without a backend.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{AttributeSet, CardCatalog, CardDefinition, CardId};
use crate::core::entity::{DeckId, UserId};
use crate::zones::DeckEntry;

/// Image shown for cards stored without one.
pub const CARD_BACK_IMAGE: &str = "/assets/images/card_backs/CARDBACK.png";

// === Wire records ===

/// A card as stored by the provider: attributes are three flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub guard: bool,
    #[serde(default)]
    pub thief: bool,
    #[serde(default)]
    pub curse: bool,
}

impl CardRecord {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, power: u32, cost: u32) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            cost,
            image: None,
            guard: false,
            thief: false,
            curse: false,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, guard: bool, thief: bool, curse: bool) -> Self {
        self.guard = guard;
        self.thief = thief;
        self.curse = curse;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Root-relative paths gain a leading slash; absolute URLs are kept; a
/// missing image becomes the card back.
fn normalize_image(image: Option<&str>) -> String {
    match image {
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(path) if !path.is_empty() => format!("/{}", path.trim_start_matches('/')),
        _ => CARD_BACK_IMAGE.to_string(),
    }
}

impl From<&CardRecord> for CardDefinition {
    fn from(record: &CardRecord) -> Self {
        CardDefinition::new(CardId::new(record.id), record.name.clone())
            .with_power(record.power)
            .with_cost(record.cost)
            .with_image(normalize_image(record.image.as_deref()))
            .with_attributes(AttributeSet::from_flags(
                record.guard,
                record.thief,
                record.curse,
            ))
    }
}

impl From<CardRecord> for CardDefinition {
    fn from(record: CardRecord) -> Self {
        CardDefinition::from(&record)
    }
}

/// One line of a stored deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCardRecord {
    pub card: CardRecord,
    pub quantity: u32,
}

impl From<&DeckCardRecord> for DeckEntry {
    fn from(record: &DeckCardRecord) -> Self {
        DeckEntry::new(CardDefinition::from(&record.card), record.quantity)
    }
}

// === Errors ===

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("deck {deck} was not found for {user}")]
    DeckNotFound { user: UserId, deck: DeckId },

    #[error("card service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed card data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RewardError {
    #[error("wallet update failed: {0}")]
    Rejected(String),
}

// === Contracts ===

/// Source of deck contents and the card catalog.
pub trait CardProvider {
    /// Lines of one stored deck, in stored order.
    fn deck_cards(&self, user: UserId, deck: DeckId) -> Result<Vec<DeckCardRecord>, ProviderError>;

    /// Every card that exists.
    fn catalog(&self) -> Result<Vec<CardRecord>, ProviderError>;
}

/// Persists the victory reward. Returns the new wallet balance.
pub trait RewardSink {
    fn grant(&mut self, user: UserId, gems: u32) -> Result<u32, RewardError>;
}

/// Collect provider records into a catalog.
#[must_use]
pub fn catalog_from_records(records: &[CardRecord]) -> CardCatalog {
    records.iter().map(CardDefinition::from).collect()
}

// === In-memory implementations ===

/// Provider backed by maps; can be switched offline to exercise failures.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    decks: FxHashMap<(UserId, DeckId), Vec<DeckCardRecord>>,
    catalog: Vec<CardRecord>,
    offline: bool,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from the JSON array a card service returns.
    pub fn from_json(catalog: &str) -> Result<Self, ProviderError> {
        let catalog: Vec<CardRecord> = serde_json::from_str(catalog)?;
        Ok(Self {
            catalog,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_catalog(mut self, cards: impl IntoIterator<Item = CardRecord>) -> Self {
        self.catalog.extend(cards);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, user: UserId, deck: DeckId, lines: Vec<DeckCardRecord>) -> Self {
        self.decks.insert((user, deck), lines);
        self
    }

    /// Add a deck from its JSON form.
    pub fn insert_deck_json(
        &mut self,
        user: UserId,
        deck: DeckId,
        json: &str,
    ) -> Result<(), ProviderError> {
        let lines: Vec<DeckCardRecord> = serde_json::from_str(json)?;
        self.decks.insert((user, deck), lines);
        Ok(())
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn ensure_online(&self) -> Result<(), ProviderError> {
        if self.offline {
            return Err(ProviderError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

impl CardProvider for InMemoryProvider {
    fn deck_cards(&self, user: UserId, deck: DeckId) -> Result<Vec<DeckCardRecord>, ProviderError> {
        self.ensure_online()?;
        self.decks
            .get(&(user, deck))
            .cloned()
            .ok_or(ProviderError::DeckNotFound { user, deck })
    }

    fn catalog(&self) -> Result<Vec<CardRecord>, ProviderError> {
        self.ensure_online()?;
        Ok(self.catalog.clone())
    }
}

/// Wallet kept in memory, recording every grant.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWallet {
    balances: FxHashMap<UserId, u32>,
    grants: Vec<(UserId, u32)>,
    failing: bool,
}

impl InMemoryWallet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_balance(mut self, user: UserId, gems: u32) -> Self {
        self.balances.insert(user, gems);
        self
    }

    /// Make every following grant fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    #[must_use]
    pub fn balance(&self, user: UserId) -> u32 {
        self.balances.get(&user).copied().unwrap_or(0)
    }

    /// Successful grants, in order.
    #[must_use]
    pub fn grants(&self) -> &[(UserId, u32)] {
        &self.grants
    }
}

impl RewardSink for InMemoryWallet {
    fn grant(&mut self, user: UserId, gems: u32) -> Result<u32, RewardError> {
        if self.failing {
            return Err(RewardError::Rejected("wallet service unavailable".into()));
        }
        let balance = self.balances.entry(user).or_insert(0);
        *balance = balance.saturating_add(gems);
        self.grants.push((user, gems));
        Ok(*balance)
    }
}
