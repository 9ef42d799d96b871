//! The match state machine.
//!
//! `MatchController` owns the `MatchState` and is the only thing that
//! mutates it. The human side drives it through commands; the opponent
//! side and every timed step run as `Continuation`s on the virtual clock,
//! executed by `advance` or `settle`.
//!
//! ```text
//! start ─► CoinToss ─confirm─► Placement ─(both sides out of turns)─►
//!   BeginBattle ─► Battle(First) ─► Battle(Second) ─► RoundEnd
//!   ─retain/skip─► CoinToss ─confirm─► Draw ─► Placement ─► ...
//! ```
//!
//! Every command is validated completely before anything changes, so a
//! rejected command leaves the match exactly as it was.
//!
//! ## Example
//!
//! ```
//! use lane_ccg::cards::{CardCatalog, CardDefinition, CardId};
//! use lane_ccg::core::{DeckId, MatchConfig, Phase};
//! use lane_ccg::rules::MatchController;
//! use lane_ccg::zones::DeckEntry;
//!
//! let imp = CardDefinition::new(CardId::new(1), "Ember Imp").with_power(2).with_cost(1);
//! let catalog: CardCatalog = [imp.clone()].into_iter().collect();
//!
//! let mut controller = MatchController::new(MatchConfig::default(), 7).unwrap();
//! controller.start(DeckId(1), &[DeckEntry::new(imp, 20)], &catalog).unwrap();
//! assert_eq!(controller.phase(), Phase::CoinToss);
//!
//! controller.confirm_coin_toss().unwrap();
//! assert_eq!(controller.phase(), Phase::Placement);
//! ```

use crate::cards::CardCatalog;
use crate::combat::{CombatResolver, PassReport};
use crate::core::command::Command;
use crate::core::config::{ConfigError, MatchConfig, LANE_COUNT};
use crate::core::entity::{DeckId, InstanceId};
use crate::core::error::{EngineError, EngineResult};
use crate::core::phase::{AttackStage, CoinFace, Outcome, Phase};
use crate::core::side::Side;
use crate::core::state::MatchState;
use crate::policy::{OpponentPolicy, Placement, PlacementView, RandomPolicy};
use crate::schedule::{Continuation, Scheduler};
use crate::zones::{build_player_deck, synthesize_opponent_deck, DeckEntry};

use super::result::{EndReason, GameResult};
use super::view::{CardSummary, MatchView, SideView};

/// Drives one match from deck selection to game over.
pub struct MatchController {
    config: MatchConfig,
    state: MatchState,
    scheduler: Scheduler,
    resolver: CombatResolver,
    policy: Box<dyn OpponentPolicy>,
    result: Option<GameResult>,
}

impl std::fmt::Debug for MatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("phase", &self.state.phase)
            .field("round", &self.state.round)
            .field("policy", &self.policy.name())
            .field("pending", &self.scheduler.pending())
            .finish()
    }
}

impl MatchController {
    /// Create a controller in `Init` with the random opponent policy.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: MatchState::new(&config, seed),
            scheduler: Scheduler::new(),
            resolver: CombatResolver::new(config.guard_block_cap),
            policy: Box::new(RandomPolicy),
            result: None,
            config,
        })
    }

    /// Replace the opponent policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Scheduled steps not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual clock, in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Append a message to the stream (used for collaborator failures).
    pub fn notify(&mut self, message: impl Into<String>) {
        self.state.push_message(message);
    }

    // === Commands ===

    /// Build both decks, deal opening hands and toss the first coin.
    ///
    /// On `DataUnavailable` the match stays in `Init` and the failure is
    /// added to the message stream.
    pub fn start(
        &mut self,
        deck_id: DeckId,
        entries: &[DeckEntry],
        catalog: &CardCatalog,
    ) -> EngineResult<()> {
        let command = Command::SelectDeck { deck_id };
        self.ensure_accepting(&command)?;
        self.ensure_phase(&command, Phase::Init)?;

        let mut ids = self.state.ids.clone();
        let mut deck_rng = self.state.rng.for_context("opponent-deck");
        let decks = build_player_deck(entries, Side::Human, self.config.max_deck_size, &mut ids)
            .and_then(|human| {
                synthesize_opponent_deck(
                    catalog,
                    &self.config.opponent_deck,
                    self.config.max_deck_size,
                    Side::Opponent,
                    &mut ids,
                    &mut deck_rng,
                )
                .map(|opponent| (human, opponent))
            });
        let (human, opponent) = match decks {
            Ok(decks) => decks,
            Err(err) => {
                log::warn!("deck selection failed: {err}");
                self.state.push_message(err.to_string());
                return Err(err);
            }
        };

        self.state.ids = ids;
        self.state.sides[Side::Human].deck = human;
        self.state.sides[Side::Opponent].deck = opponent;
        self.state.record(Side::Human, command);

        for side in Side::ALL {
            let st = &mut self.state.sides[side];
            let report = st.hand.refill(&mut st.deck, self.config.hand_draw, &mut self.state.rng);
            log::debug!("{side} opening hand: {} card(s)", report.drawn);
        }
        log::info!(
            "match started with {} ({} cards vs {})",
            deck_id,
            self.state.sides[Side::Human].deck.len() + self.state.sides[Side::Human].hand.len(),
            self.state.sides[Side::Opponent].deck.len() + self.state.sides[Side::Opponent].hand.len(),
        );
        self.state.push_message("Decks are ready. Opening hands dealt.");
        self.toss_coin();
        Ok(())
    }

    /// Acknowledge the coin toss and move on to drawing or placement.
    pub fn confirm_coin_toss(&mut self) -> EngineResult<()> {
        let command = Command::ConfirmCoinToss;
        self.ensure_accepting(&command)?;
        self.ensure_phase(&command, Phase::CoinToss)?;

        self.state.record(Side::Human, command);
        if self.state.round == 1 {
            self.begin_placement();
        } else {
            self.draw_phase();
        }
        Ok(())
    }

    /// Place a hand card face-up into an empty lane.
    pub fn place_card(&mut self, card: InstanceId, lane: usize) -> EngineResult<()> {
        let command = Command::PlaceCard { card, lane };
        self.ensure_human_turn(&command)?;
        self.validate_placement(Side::Human, card, lane)?;

        self.commit_placement(Side::Human, card, lane);
        self.state.stats.record_placement();
        self.state.record(Side::Human, command);
        self.next_turn(Side::Human);
        Ok(())
    }

    /// Take back a card placed this round; refunds its cost and keeps the
    /// turn counter as it is.
    pub fn retract_card(&mut self, lane: usize) -> EngineResult<()> {
        let command = Command::RetractCard { lane };
        self.ensure_active_human(&command)?;
        let round = self.state.round;
        let side = &self.state.sides[Side::Human];
        let slot = side.lanes.get(lane).ok_or(EngineError::LaneOutOfRange(lane))?;
        if slot.is_empty() {
            return Err(EngineError::LaneEmpty(lane));
        }
        if slot.placed_round() != round {
            return Err(EngineError::RetractLocked(lane));
        }

        let side = &mut self.state.sides[Side::Human];
        let Some(card) = side.lanes[lane].take() else {
            return Err(EngineError::LaneEmpty(lane));
        };
        side.refund(card.cost());
        let name = card.name().to_string();
        side.hand.add(card);
        self.state.stats.record_retraction();
        self.state.record(Side::Human, command);
        self.state
            .push_message(format!("You took {name} back from lane {}.", lane + 1));
        Ok(())
    }

    /// Spend a placement turn without placing.
    pub fn pass_turn(&mut self) -> EngineResult<()> {
        let command = Command::PassTurn;
        self.ensure_human_turn(&command)?;

        self.take_turn(Side::Human);
        self.state.record(Side::Human, command);
        self.state.push_message("You passed.");
        self.next_turn(Side::Human);
        Ok(())
    }

    /// Keep one hand or lane card for the next round.
    pub fn retain_card(&mut self, card: InstanceId) -> EngineResult<()> {
        let command = Command::RetainCard { card };
        self.ensure_accepting(&command)?;
        self.ensure_phase(&command, Phase::RoundEnd)?;
        if self.state.retention.is_holding() {
            return Err(EngineError::AlreadyRetained);
        }

        let side = &mut self.state.sides[Side::Human];
        let kept = match side.hand.remove(card) {
            Some(kept) => kept,
            None => {
                let lane = side.lanes.find(card).ok_or(EngineError::NotRetainable(card))?;
                side.lanes[lane]
                    .take()
                    .ok_or(EngineError::NotRetainable(card))?
            }
        };
        let name = kept.name().to_string();
        if let Err(kept) = self.state.retention.hold(kept) {
            self.state.sides[Side::Human].hand.add(kept);
            return Err(EngineError::AlreadyRetained);
        }

        self.state.record(Side::Human, command);
        self.state
            .push_message(format!("You kept {name} for the next round."));
        self.advance_round();
        Ok(())
    }

    /// Decline to retain a card.
    pub fn skip_retain(&mut self) -> EngineResult<()> {
        let command = Command::SkipRetain;
        self.ensure_accepting(&command)?;
        self.ensure_phase(&command, Phase::RoundEnd)?;

        self.state.record(Side::Human, command);
        self.advance_round();
        Ok(())
    }

    /// Concede during placement or battle. Pending steps are dropped.
    pub fn forfeit(&mut self) -> EngineResult<()> {
        let command = Command::Forfeit;
        self.ensure_accepting(&command)?;
        if !self.state.phase.accepts_forfeit() {
            return Err(EngineError::WrongPhase {
                command: command.verb(),
                phase: self.state.phase,
            });
        }

        self.state.record(Side::Human, command);
        self.finish(Outcome::Defeat, EndReason::Forfeit);
        Ok(())
    }

    /// Apply any command.
    pub fn apply(&mut self, command: Command) -> EngineResult<()> {
        match command {
            Command::SelectDeck { .. } => Err(EngineError::DataUnavailable(
                "deck selection needs the card provider".into(),
            )),
            Command::ConfirmCoinToss => self.confirm_coin_toss(),
            Command::PlaceCard { card, lane } => self.place_card(card, lane),
            Command::RetractCard { lane } => self.retract_card(lane),
            Command::PassTurn => self.pass_turn(),
            Command::RetainCard { card } => self.retain_card(card),
            Command::SkipRetain => self.skip_retain(),
            Command::Forfeit => self.forfeit(),
        }
    }

    // === Clock ===

    /// Move the clock forward by `ms`, running every step that falls due.
    /// Returns the number of steps run.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.scheduler.now().saturating_add(ms);
        let mut ran = 0;
        while let Some(step) = self.scheduler.pop_due(target) {
            self.run(step);
            ran += 1;
        }
        self.scheduler.advance_to(target);
        ran
    }

    /// Run queued steps until the match waits for the human or ends.
    pub fn settle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(step) = self.scheduler.pop_next() {
            self.run(step);
            ran += 1;
        }
        ran
    }

    // === Queries ===

    /// Every `(card, lane)` the human could place right now.
    #[must_use]
    pub fn legal_placements(&self) -> Vec<(InstanceId, usize)> {
        if self.state.phase != Phase::Placement
            || self.state.active != Side::Human
            || !self.scheduler.is_idle()
        {
            return Vec::new();
        }
        let side = &self.state.sides[Side::Human];
        if side.turns_left(self.config.turns_per_round) == 0 {
            return Vec::new();
        }
        let open = side.lanes.open_lanes();
        side.hand
            .affordable(side.mana)
            .flat_map(|card| open.iter().map(move |&lane| (card.id, lane)))
            .collect()
    }

    /// Lanes whose card the human may take back.
    #[must_use]
    pub fn retractable_lanes(&self) -> Vec<usize> {
        if self.state.phase != Phase::Placement || self.state.active != Side::Human {
            return Vec::new();
        }
        self.state.sides[Side::Human]
            .lanes
            .iter()
            .filter(|(_, l)| !l.is_empty() && l.placed_round() == self.state.round)
            .map(|(i, _)| i)
            .collect()
    }

    /// Cards the human may keep at round end.
    #[must_use]
    pub fn retention_candidates(&self) -> Vec<InstanceId> {
        let side = &self.state.sides[Side::Human];
        side.hand
            .iter()
            .chain(side.lanes.cards())
            .map(|c| c.id)
            .collect()
    }

    /// Presentation snapshot.
    #[must_use]
    pub fn view(&self) -> MatchView {
        let state = &self.state;
        MatchView {
            phase: state.phase,
            round: state.round,
            coin_toss: state.coin_toss,
            active: state.active,
            human: SideView::from(&state.sides[Side::Human]),
            opponent: SideView::from(&state.sides[Side::Opponent]),
            hand: state.sides[Side::Human].hand.iter().map(CardSummary::from).collect(),
            retained: state.retention.held().map(CardSummary::from),
            messages: state.recent_messages(self.config.message_window),
            passes: state.round_reports.clone(),
            result: self.result.clone(),
            pending_steps: self.scheduler.pending(),
            clock_ms: self.scheduler.now(),
        }
    }

    // === Guards ===

    fn ensure_accepting(&self, command: &Command) -> EngineResult<()> {
        if self.result.is_some() {
            return Err(EngineError::MatchOver);
        }
        if command.advances_phase() && !self.scheduler.is_idle() {
            return Err(EngineError::Busy(self.scheduler.pending()));
        }
        Ok(())
    }

    fn ensure_phase(&self, command: &Command, expected: Phase) -> EngineResult<()> {
        if self.state.phase != expected {
            return Err(EngineError::WrongPhase {
                command: command.verb(),
                phase: self.state.phase,
            });
        }
        Ok(())
    }

    fn ensure_human_turn(&self, command: &Command) -> EngineResult<()> {
        self.ensure_active_human(command)?;
        let left = self.state.sides[Side::Human].turns_left(self.config.turns_per_round);
        if left == 0 {
            return Err(EngineError::TurnsExhausted(self.config.turns_per_round));
        }
        Ok(())
    }

    /// Placement-phase commands: the turn owner is checked before pending
    /// steps, so acting during the opponent's turn reads as `NotYourTurn`.
    fn ensure_active_human(&self, command: &Command) -> EngineResult<()> {
        if self.result.is_some() {
            return Err(EngineError::MatchOver);
        }
        self.ensure_phase(command, Phase::Placement)?;
        if self.state.active != Side::Human {
            return Err(EngineError::NotYourTurn);
        }
        self.ensure_accepting(command)
    }

    fn validate_placement(&self, side: Side, card: InstanceId, lane: usize) -> EngineResult<()> {
        let st = &self.state.sides[side];
        let slot = st.lanes.get(lane).ok_or(EngineError::LaneOutOfRange(lane))?;
        if !slot.is_empty() {
            return Err(EngineError::LaneOccupied(lane));
        }
        let card = st.hand.get(card).ok_or(EngineError::CardNotInHand(card))?;
        if !card.is_affordable(st.mana) {
            return Err(EngineError::InsufficientMana {
                need: card.cost(),
                have: st.mana,
            });
        }
        Ok(())
    }

    // === Transitions ===

    fn toss_coin(&mut self) {
        let face = self.state.rng.coin_toss();
        self.state.coin_toss = Some(face);
        self.state.phase = Phase::CoinToss;
        let first = self.state.first_attacker();
        log::info!("round {}: coin toss {face:?}, {first} first", self.state.round);
        self.state.push_message(match face {
            CoinFace::Heads => "Coin toss: Heads. You place and attack first.",
            CoinFace::Tails => "Coin toss: Tails. The opponent places and attacks first.",
        });
    }

    fn draw_phase(&mut self) {
        self.state.phase = Phase::Draw;

        let owed = self.state.retention.draw_count(self.config.hand_draw);
        if let Some(kept) = self.state.retention.take() {
            self.state.sides[Side::Human].hand.add(kept);
        }
        for side in Side::ALL {
            let owed = match side {
                Side::Human => owed,
                Side::Opponent => self.config.hand_draw,
            };
            let st = &mut self.state.sides[side];
            let report = st.hand.refill(&mut st.deck, owed, &mut self.state.rng);
            if report.is_exhausted() {
                self.state
                    .push_message(format!("{} deck is empty!", side.possessive()));
                self.finish(Outcome::DeckExhausted, EndReason::DeckExhausted(side));
                return;
            }
            if report.is_short() {
                self.state.push_message(format!(
                    "{} deck ran short: drew {} of {}.",
                    side.possessive(),
                    report.drawn,
                    report.owed
                ));
            }
        }
        self.begin_placement();
    }

    fn begin_placement(&mut self) {
        self.state.phase = Phase::Placement;
        self.state.round_reports.clear();
        for (_, side) in self.state.sides.iter_mut() {
            side.turns_taken = 0;
        }
        self.state.active = self.state.first_attacker();
        log::info!("round {}: placement", self.state.round);
        self.state
            .push_message(format!("Round {}: place your cards.", self.state.round));
        self.prompt_active();
    }

    /// Hand the turn to whoever moves after `after`, or start the battle.
    fn next_turn(&mut self, after: Side) {
        let per_round = self.config.turns_per_round;
        let other = after.opponent();
        let other_left = self.state.sides[other].turns_left(per_round);
        let after_left = self.state.sides[after].turns_left(per_round);

        if other_left == 0 && after_left == 0 {
            self.state.active = after;
            self.state.push_message("Placement complete. Battle is about to begin!");
            self.scheduler
                .schedule(self.config.timings.battle_start_ms, Continuation::BeginBattle);
            return;
        }
        self.state.active = if other_left > 0 { other } else { after };
        self.prompt_active();
    }

    fn prompt_active(&mut self) {
        match self.state.active {
            Side::Opponent => {
                let delay = if self.state.sides[Side::Opponent].turns_taken == 0 {
                    self.config.timings.opponent_first_turn_ms
                } else {
                    self.config.timings.opponent_turn_ms
                };
                self.scheduler.schedule(delay, Continuation::OpponentTurn);
            }
            Side::Human => {
                if !self.human_can_act() {
                    self.take_turn(Side::Human);
                    self.state
                        .push_message("You have no playable card. Turn passed.");
                    self.next_turn(Side::Human);
                }
            }
        }
    }

    fn human_can_act(&self) -> bool {
        let side = &self.state.sides[Side::Human];
        let can_place =
            side.lanes.occupied() < LANE_COUNT && side.hand.affordable(side.mana).next().is_some();
        let can_retract = side
            .lanes
            .iter()
            .any(|(_, l)| !l.is_empty() && l.placed_round() == self.state.round);
        can_place || can_retract
    }

    fn take_turn(&mut self, side: Side) {
        self.state.sides[side].turns_taken += 1;
        self.state.stats.record_turn();
    }

    fn commit_placement(&mut self, side: Side, card: InstanceId, lane: usize) {
        let round = self.state.round;
        let face_down = side == Side::Opponent;
        let st = &mut self.state.sides[side];
        let Some(instance) = st.hand.remove(card) else {
            return;
        };
        // Validated by the caller.
        if st.spend(instance.cost()).is_err() {
            st.hand.add(instance);
            return;
        }
        let name = instance.name().to_string();
        if let Err(instance) = st.lanes[lane].place(instance, face_down, round) {
            st.refund(instance.cost());
            st.hand.add(instance);
            return;
        }
        self.take_turn(side);

        log::debug!("{side} placed {card} in lane {lane}");
        self.state.push_message(match side {
            Side::Human => format!("You placed {name} in lane {}.", lane + 1),
            Side::Opponent => format!("The opponent placed a card face-down in lane {}.", lane + 1),
        });
    }

    // === Continuations ===

    fn run(&mut self, step: Continuation) {
        if self.result.is_some() {
            return;
        }
        match step {
            Continuation::OpponentTurn => self.opponent_turn(),
            Continuation::BeginBattle => self.begin_battle(),
            Continuation::AttackPass(stage) => self.attack_pass(stage),
        }
    }

    fn opponent_turn(&mut self) {
        if self.state.phase != Phase::Placement || self.state.active != Side::Opponent {
            return;
        }
        let decision = {
            let side = &self.state.sides[Side::Opponent];
            let view = PlacementView {
                hand: &side.hand,
                mana: side.mana,
                open_lanes: side.lanes.open_lanes(),
                round: self.state.round,
            };
            self.policy.choose(&view, &mut self.state.rng)
        };

        let placed = match decision {
            Placement::Place { card, lane } => {
                match self.validate_placement(Side::Opponent, card, lane) {
                    Ok(()) => {
                        self.commit_placement(Side::Opponent, card, lane);
                        self.state
                            .record(Side::Opponent, Command::PlaceCard { card, lane });
                        true
                    }
                    Err(err) => {
                        log::warn!("{} policy chose an illegal placement: {err}", self.policy.name());
                        false
                    }
                }
            }
            Placement::Pass => false,
        };
        if !placed {
            self.take_turn(Side::Opponent);
            self.state.record(Side::Opponent, Command::PassTurn);
            self.state.push_message("The opponent passed.");
        }
        self.next_turn(Side::Opponent);
    }

    fn begin_battle(&mut self) {
        if self.state.phase != Phase::Placement {
            return;
        }
        for (_, side) in self.state.sides.iter_mut() {
            side.lanes.reveal_all();
        }
        self.state.phase = Phase::Battle(AttackStage::First);
        log::info!("round {}: battle", self.state.round);
        self.state.push_message("All cards are revealed. Battle!");
        self.scheduler.schedule(
            self.config.timings.attack_pass_ms,
            Continuation::AttackPass(AttackStage::First),
        );
    }

    fn attack_pass(&mut self, stage: AttackStage) {
        if self.state.phase != Phase::Battle(stage) {
            return;
        }
        let attacker = match stage {
            AttackStage::First => self.state.first_attacker(),
            AttackStage::Second => self.state.first_attacker().opponent(),
        };
        let defender = attacker.opponent();

        let report = {
            let (att, def) = self.state.sides.split_mut(attacker);
            let report = self.resolver.resolve_pass(attacker, &mut att.lanes, &mut def.lanes);
            def.apply_damage(report.damage_to_defender());
            att.apply_damage(report.damage_to_attacker());
            report
        };
        self.record_pass(report);

        if self.state.sides[defender].is_defeated() {
            self.finish_by_life(defender);
        } else if self.state.sides[attacker].is_defeated() {
            self.finish_by_life(attacker);
        } else if stage == AttackStage::First {
            self.state.phase = Phase::Battle(AttackStage::Second);
            self.scheduler.schedule(
                self.config.timings.attack_pass_ms,
                Continuation::AttackPass(AttackStage::Second),
            );
        } else {
            self.end_round();
        }
    }

    fn record_pass(&mut self, report: PassReport) {
        self.state.stats.record_pass(&report);
        let messages: Vec<String> = report.messages().collect();
        for message in messages {
            self.state.push_message(message);
        }
        let total = report.damage_to_defender();
        if total > 0 {
            self.state.push_message(format!("Total direct damage: {total}"));
        }
        self.state.round_reports.push(report);
    }

    fn end_round(&mut self) {
        self.state.phase = Phase::RoundEnd;
        self.state.stats.end_round();

        if self.retention_candidates().is_empty() {
            self.advance_round();
        } else {
            self.state
                .push_message("Round over. Choose one card to keep, or skip.");
        }
    }

    fn advance_round(&mut self) {
        let discarded = self.state.sides[Side::Human].hand.clear();
        if !discarded.is_empty() {
            log::debug!("discarded {} unplayed card(s)", discarded.len());
        }
        self.state.sides[Side::Opponent].hand.clear();

        self.state.round += 1;
        let mana = self.config.mana_for_round(self.state.round);
        for (_, side) in self.state.sides.iter_mut() {
            side.mana = mana;
            side.turns_taken = 0;
        }
        log::info!("round {} begins with {mana} mana", self.state.round);
        self.toss_coin();
    }

    fn finish_by_life(&mut self, loser: Side) {
        let outcome = match loser {
            Side::Opponent => Outcome::Victory,
            Side::Human => Outcome::Defeat,
        };
        self.finish(outcome, EndReason::LifeDepleted);
    }

    fn finish(&mut self, outcome: Outcome, reason: EndReason) {
        if self.result.is_some() {
            return;
        }
        self.scheduler.cancel_all();
        self.state.phase = Phase::GameOver(outcome);

        let result = GameResult {
            outcome,
            reason,
            final_life: self.state.sides[Side::Human].life,
            enemy_final_life: self.state.sides[Side::Opponent].life,
            stats: self.state.stats.finish(self.state.round),
            gems_earned: if outcome == Outcome::Victory {
                self.config.victory_gems
            } else {
                0
            },
        };
        log::info!(
            "match over after {} round(s): {outcome} ({reason})",
            self.state.round
        );
        self.state.push_message(result.summary());
        self.result = Some(result);
    }
}
