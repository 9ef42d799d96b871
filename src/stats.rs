//! Match-wide counters, from the human side's point of view.

use serde::{Deserialize, Serialize};

use crate::combat::PassReport;
use crate::core::side::Side;

/// Snapshot of the match counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Life removed from the opponent, Curse backfire included.
    pub damage_dealt: u32,

    /// Life removed from the human side.
    pub damage_taken: u32,

    /// Most damage dealt to the opponent in one attack pass.
    pub highest_pass_damage: u32,

    /// Placements, minus retractions.
    pub cards_played: u32,

    /// Human cards destroyed in combat.
    pub cards_lost: u32,

    pub enemy_cards_destroyed: u32,

    /// Unblocked Thief damage dealt.
    pub thief_damage: u32,

    /// Blocks made by the human side's Guards.
    pub guard_blocks: u32,

    /// Curse backfire that hit the opponent.
    pub curse_damage: u32,

    /// Curse backfire that hit the human side.
    pub curse_damage_taken: u32,

    /// Round count at termination.
    pub rounds_played: u32,

    /// Most placement turns (both sides, passes included) in one round.
    pub longest_round: u32,
}

/// Accumulates `MatchStats` over a match. Never reset mid-match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsLedger {
    stats: MatchStats,
    round_turns: u32,
}

impl StatsLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the running totals.
    #[must_use]
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// A human placement.
    pub fn record_placement(&mut self) {
        self.stats.cards_played += 1;
    }

    /// A human retraction undoes its placement.
    pub fn record_retraction(&mut self) {
        self.stats.cards_played = self.stats.cards_played.saturating_sub(1);
    }

    /// A placement turn was taken or passed, by either side.
    pub fn record_turn(&mut self) {
        self.round_turns += 1;
    }

    /// Fold one attack pass into the totals.
    pub fn record_pass(&mut self, report: &PassReport) {
        let s = &mut self.stats;
        match report.attacker {
            Side::Human => {
                let dealt = report.damage_to_defender();
                s.damage_dealt = s.damage_dealt.saturating_add(dealt);
                s.damage_taken = s.damage_taken.saturating_add(report.damage_to_attacker());
                s.highest_pass_damage = s.highest_pass_damage.max(dealt);
                s.thief_damage = s.thief_damage.saturating_add(report.thief_damage);
                s.curse_damage = s.curse_damage.saturating_add(report.curse_to_defender);
                s.curse_damage_taken = s.curse_damage_taken.saturating_add(report.curse_to_attacker);
                s.enemy_cards_destroyed = s.enemy_cards_destroyed.saturating_add(report.defenders_destroyed);
                s.cards_lost = s.cards_lost.saturating_add(report.attackers_destroyed);
            }
            Side::Opponent => {
                let dealt = report.damage_to_attacker();
                s.damage_dealt = s.damage_dealt.saturating_add(dealt);
                s.damage_taken = s.damage_taken.saturating_add(report.damage_to_defender());
                s.highest_pass_damage = s.highest_pass_damage.max(dealt);
                s.curse_damage = s.curse_damage.saturating_add(report.curse_to_attacker);
                s.curse_damage_taken = s.curse_damage_taken.saturating_add(report.curse_to_defender);
                s.guard_blocks = s.guard_blocks.saturating_add(report.guard_blocks);
                s.enemy_cards_destroyed = s.enemy_cards_destroyed.saturating_add(report.attackers_destroyed);
                s.cards_lost = s.cards_lost.saturating_add(report.defenders_destroyed);
            }
        }
    }

    /// Close the current round's turn count.
    pub fn end_round(&mut self) {
        self.stats.longest_round = self.stats.longest_round.max(self.round_turns);
        self.round_turns = 0;
    }

    /// Final snapshot, closing the round in progress.
    #[must_use]
    pub fn finish(&self, rounds_played: u32) -> MatchStats {
        let mut stats = self.stats.clone();
        stats.longest_round = stats.longest_round.max(self.round_turns);
        stats.rounds_played = rounds_played;
        stats
    }
}
