//! One player's match against the automated opponent, wired to the card
//! provider and the reward sink.
//!
//! `ArenaSession` is the surface the presentation layer talks to: it
//! accepts `Command`s, fetches deck and catalog data on deck selection,
//! moves the virtual clock, and grants the victory reward exactly once
//! after whichever step ended the match.
//!
//! ## Example
//!
//! ```
//! use lane_ccg::core::{Command, DeckId, MatchConfig, Phase, UserId};
//! use lane_ccg::provider::{CardRecord, DeckCardRecord, InMemoryProvider, InMemoryWallet};
//! use lane_ccg::session::ArenaSession;
//!
//! let pebble = CardRecord::new(1, "Pebble", 1, 1);
//! let provider = InMemoryProvider::new()
//!     .with_catalog([pebble.clone()])
//!     .with_deck(UserId(1), DeckId(1), vec![DeckCardRecord { card: pebble, quantity: 20 }]);
//!
//! let mut session =
//!     ArenaSession::new(UserId(1), provider, InMemoryWallet::new(), MatchConfig::default(), 3)
//!         .unwrap();
//! session.submit(Command::SelectDeck { deck_id: DeckId(1) }).unwrap();
//! assert_eq!(session.view().phase, Phase::CoinToss);
//! ```

use crate::core::command::Command;
use crate::core::config::{ConfigError, MatchConfig};
use crate::core::entity::{DeckId, UserId};
use crate::core::error::{EngineError, EngineResult};
use crate::policy::OpponentPolicy;
use crate::provider::{catalog_from_records, CardProvider, ProviderError, RewardSink};
use crate::rules::{GameResult, MatchController, MatchView};
use crate::zones::DeckEntry;

/// A match plus its collaborators.
#[derive(Debug)]
pub struct ArenaSession<P, R> {
    user: UserId,
    provider: P,
    rewards: R,
    controller: MatchController,
    reward_issued: bool,
}

impl<P: CardProvider, R: RewardSink> ArenaSession<P, R> {
    pub fn new(
        user: UserId,
        provider: P,
        rewards: R,
        config: MatchConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            user,
            provider,
            rewards,
            controller: MatchController::new(config, seed)?,
            reward_issued: false,
        })
    }

    /// Replace the opponent policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.controller = self.controller.with_policy(policy);
        self
    }

    // === Input ===

    /// Apply a presentation command.
    pub fn submit(&mut self, command: Command) -> EngineResult<()> {
        let outcome = match command {
            Command::SelectDeck { deck_id } => self.select_deck(deck_id),
            other => self.controller.apply(other),
        };
        if let Err(err) = &outcome {
            log::debug!("rejected {}: {err}", command.verb());
        }
        self.settle_reward();
        outcome
    }

    /// Fetch the deck and catalog, then start the match.
    ///
    /// A provider failure is reported as `DataUnavailable` and leaves the
    /// session waiting for another selection.
    pub fn select_deck(&mut self, deck_id: DeckId) -> EngineResult<()> {
        let lines = self
            .provider
            .deck_cards(self.user, deck_id)
            .map_err(|err| self.unavailable(err))?;
        let records = self.provider.catalog().map_err(|err| self.unavailable(err))?;

        let entries: Vec<DeckEntry> = lines.iter().map(DeckEntry::from).collect();
        let catalog = catalog_from_records(&records);
        log::debug!(
            "{deck_id}: {} deck line(s), {} catalog card(s)",
            entries.len(),
            catalog.len()
        );
        self.controller.start(deck_id, &entries, &catalog)
    }

    fn unavailable(&mut self, err: ProviderError) -> EngineError {
        log::warn!("card provider failed: {err}");
        let err = EngineError::DataUnavailable(err.to_string());
        self.controller.notify(err.to_string());
        err
    }

    // === Clock ===

    /// Move the virtual clock forward. Returns the number of steps run.
    pub fn advance(&mut self, ms: u64) -> usize {
        let ran = self.controller.advance(ms);
        self.settle_reward();
        ran
    }

    /// Run every queued step.
    pub fn settle(&mut self) -> usize {
        let ran = self.controller.settle();
        self.settle_reward();
        ran
    }

    fn settle_reward(&mut self) {
        if self.reward_issued {
            return;
        }
        let Some(result) = self.controller.result() else {
            return;
        };
        if !result.is_victory() || result.gems_earned == 0 {
            return;
        }
        let gems = result.gems_earned;
        self.reward_issued = true;

        match self.rewards.grant(self.user, gems) {
            Ok(balance) => {
                log::info!("granted {gems} gems to {}, balance {balance}", self.user);
                self.controller
                    .notify(format!("You earned {gems} gems! Wallet: {balance}."));
            }
            Err(err) => {
                log::warn!("reward for {} not saved: {err}", self.user);
                self.controller
                    .notify(format!("Your {gems} gems could not be saved: {err}"));
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    #[must_use]
    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    #[must_use]
    pub fn view(&self) -> MatchView {
        self.controller.view()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.controller.result()
    }

    /// Whether the victory reward has been requested.
    #[must_use]
    pub fn reward_issued(&self) -> bool {
        self.reward_issued
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    #[must_use]
    pub fn rewards(&self) -> &R {
        &self.rewards
    }

    pub fn rewards_mut(&mut self) -> &mut R {
        &mut self.rewards
    }
}
