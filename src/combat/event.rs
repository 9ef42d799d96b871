//! Combat events and their human-readable rendering.
//!
//! Events are informational: resolution never reads them back. They are
//! rendered from the attacking side's point of view, with 1-based lane
//! numbers.

use serde::{Deserialize, Serialize};

use crate::core::side::Side;

/// How a lane clash ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClashResult {
    AttackerWins,
    DefenderWins,
    Trade,
}

/// Something that happened during an attack pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A Guard sat out because its opposing lane is occupied.
    GuardHeld { lane: usize, card: String },

    DirectHit { lane: usize, card: String, damage: u32 },

    ThiefBypass { lane: usize, card: String, damage: u32 },

    GuardBlock {
        lane: usize,
        guard_lane: usize,
        guard: String,
        attacker: String,
        thief: bool,
        attacker_destroyed: bool,
        blocks: u8,
        cap: u8,
    },

    GuardRetired { lane: usize, guard: String, cap: u8 },

    Clash {
        lane: usize,
        attacker: String,
        attacker_power: u32,
        defender: String,
        defender_power: u32,
        result: ClashResult,
    },

    /// A destroyed Curse card damaged the side that did not own it.
    CurseBackfire {
        lane: usize,
        card: String,
        owner: Side,
        damage: u32,
    },
}

impl CombatEvent {
    /// Lane the event is reported against.
    #[must_use]
    pub fn lane(&self) -> usize {
        match self {
            CombatEvent::GuardHeld { lane, .. }
            | CombatEvent::DirectHit { lane, .. }
            | CombatEvent::ThiefBypass { lane, .. }
            | CombatEvent::GuardBlock { lane, .. }
            | CombatEvent::GuardRetired { lane, .. }
            | CombatEvent::Clash { lane, .. }
            | CombatEvent::CurseBackfire { lane, .. } => *lane,
        }
    }

    /// Render the event for the message stream.
    #[must_use]
    pub fn describe(&self, attacker: Side) -> String {
        let att = attacker.possessive();
        let def = attacker.opponent().possessive();
        match self {
            CombatEvent::GuardHeld { lane, card } => {
                format!("Lane {}: {att} Guard {card} holds its position", lane + 1)
            }
            CombatEvent::DirectHit { lane, card, damage } => {
                format!("Lane {}: {att} {card} deals {damage} direct damage!", lane + 1)
            }
            CombatEvent::ThiefBypass { lane, card, damage } => format!(
                "Lane {}: {att} Thief {card} bypasses defense and deals {damage} direct damage!",
                lane + 1
            ),
            CombatEvent::GuardBlock {
                lane,
                guard_lane,
                guard,
                attacker: card,
                thief,
                attacker_destroyed,
                blocks,
                cap,
            } => {
                let kind = if *thief { "Thief" } else { "attacker" };
                let source = if guard_lane == lane {
                    format!("{def} Guard {guard}")
                } else {
                    format!("{def} Guard {guard} from lane {}", guard_lane + 1)
                };
                let outcome = if *attacker_destroyed {
                    format!(" {att} {card} is destroyed by the guard's superior defense!")
                } else {
                    String::new()
                };
                format!(
                    "Lane {}: {source} blocks the {kind} {card}!{outcome} (Block {blocks}/{cap})",
                    lane + 1
                )
            }
            CombatEvent::GuardRetired { guard, cap, .. } => {
                format!("{def} Guard {guard} has retired after {cap} blocks!")
            }
            CombatEvent::Clash {
                lane,
                attacker: a,
                attacker_power,
                defender: d,
                defender_power,
                result,
            } => {
                let verdict = match result {
                    ClashResult::AttackerWins => format!("{def} card destroyed!"),
                    ClashResult::DefenderWins => format!("{att} card destroyed!"),
                    ClashResult::Trade => "Both cards destroyed in equal combat!".to_string(),
                };
                format!(
                    "Lane {}: {att} {a} (Power: {attacker_power}) vs {def} {d} (Power: {defender_power}) - {verdict}",
                    lane + 1
                )
            }
            CombatEvent::CurseBackfire {
                card, owner, damage, ..
            } => {
                let target = match owner.opponent() {
                    Side::Human => "you",
                    Side::Opponent => "the opponent",
                };
                format!(
                    "CURSE EFFECT: {} {card} deals {damage} direct damage to {target}!",
                    owner.possessive()
                )
            }
        }
    }
}
