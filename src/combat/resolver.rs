//! Attack pass resolution.
//!
//! One pass resolves every lane of the attacking side, left to right,
//! against the defending side's lanes:
//!
//! 1. A Guard attacker whose opposing lane is occupied sits the pass out.
//! 2. A Thief, or any attacker facing an occupied lane, may be intercepted
//!    by an un-saturated defending Guard: same lane first, then the left
//!    neighbour, then the right. The block increments the Guard's count,
//!    destroys the attacker when its power does not exceed the Guard's,
//!    and retires the Guard once the count reaches the cap.
//! 3. An unblocked Thief, or any attacker facing an empty lane, hits the
//!    defending life total directly.
//! 4. Otherwise the two cards clash: the higher power survives, equal
//!    power destroys both.
//!
//! Destroyed Curse cards backfire their power onto the side that did not
//! own them. Card presence is read from the pre-pass snapshot so a
//! destruction or retirement in one lane never changes another lane's
//! outcome. Guard block counts are live because a single Guard can cover
//! three lanes: a Guard that reaches the cap stops blocking for the rest of
//! the pass but still fights in its own lane. Removals are applied once the
//! pass is complete.
//!
//! All powers go through `CardInstance::attack_power`, so a zero-power card
//! still fights and hits for 1.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::{ClashResult, CombatEvent};
use crate::cards::CardInstance;
use crate::core::config::LANE_COUNT;
use crate::core::side::Side;
use crate::zones::Lanes;

/// Everything one attack pass did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub attacker: Side,

    /// In resolution order.
    pub events: SmallVec<[CombatEvent; 8]>,

    /// Unblocked non-Thief hits.
    pub direct_damage: u32,

    /// Unblocked Thief hits.
    pub thief_damage: u32,

    /// Backfire from the attacker's destroyed Curse cards.
    pub curse_to_defender: u32,

    /// Backfire from the defender's destroyed Curse cards.
    pub curse_to_attacker: u32,

    /// Blocks made by defending Guards.
    pub guard_blocks: u32,

    pub attackers_destroyed: u32,
    pub defenders_destroyed: u32,
    pub guards_retired: u32,
}

impl PassReport {
    #[must_use]
    pub fn new(attacker: Side) -> Self {
        Self {
            attacker,
            events: SmallVec::new(),
            direct_damage: 0,
            thief_damage: 0,
            curse_to_defender: 0,
            curse_to_attacker: 0,
            guard_blocks: 0,
            attackers_destroyed: 0,
            defenders_destroyed: 0,
            guards_retired: 0,
        }
    }

    #[must_use]
    pub fn defender(&self) -> Side {
        self.attacker.opponent()
    }

    /// Life the defending side loses.
    #[must_use]
    pub fn damage_to_defender(&self) -> u32 {
        self.direct_damage
            .saturating_add(self.thief_damage)
            .saturating_add(self.curse_to_defender)
    }

    /// Life the attacking side loses (Curse backfire only).
    #[must_use]
    pub fn damage_to_attacker(&self) -> u32 {
        self.curse_to_attacker
    }

    /// Damage a given side suffered in this pass.
    #[must_use]
    pub fn damage_to(&self, side: Side) -> u32 {
        if side == self.attacker {
            self.damage_to_attacker()
        } else {
            self.damage_to_defender()
        }
    }

    /// Rendered event messages.
    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(move |e| e.describe(self.attacker))
    }
}

/// Resolves attack passes under a fixed Guard block cap.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardDefinition, CardId, CardInstance};
/// use lane_ccg::combat::CombatResolver;
/// use lane_ccg::core::{InstanceId, Side};
/// use lane_ccg::zones::Lanes;
///
/// let mut mine = Lanes::new();
/// let mut theirs = Lanes::new();
/// let imp = CardDefinition::new(CardId::new(1), "Ember Imp").with_power(4);
/// mine[0].place(CardInstance::new(InstanceId(0), imp, Side::Human), false, 1).unwrap();
///
/// let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut mine, &mut theirs);
/// assert_eq!(report.damage_to_defender(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatResolver {
    block_cap: u8,
}

/// Per-pass scratch state.
struct PassState {
    guard_counts: [u8; LANE_COUNT],
    retired: [bool; LANE_COUNT],
    attacker_destroyed: [bool; LANE_COUNT],
    defender_destroyed: [bool; LANE_COUNT],
}

impl CombatResolver {
    #[must_use]
    pub fn new(block_cap: u8) -> Self {
        Self { block_cap }
    }

    #[must_use]
    pub fn block_cap(&self) -> u8 {
        self.block_cap
    }

    /// Resolve one pass and apply its removals and Guard counts to the
    /// lanes. Life totals are left to the caller.
    pub fn resolve_pass(
        &self,
        attacker: Side,
        attacking: &mut Lanes,
        defending: &mut Lanes,
    ) -> PassReport {
        let att = attacking.snapshot();
        let def = defending.snapshot();
        let mut state = PassState {
            guard_counts: defending.guard_counts(),
            retired: [false; LANE_COUNT],
            attacker_destroyed: [false; LANE_COUNT],
            defender_destroyed: [false; LANE_COUNT],
        };
        let mut report = PassReport::new(attacker);

        for lane in 0..LANE_COUNT {
            let Some(card) = att[lane].as_ref() else {
                continue;
            };
            self.resolve_lane(lane, card, &def, &mut state, &mut report);
        }

        for lane in 0..LANE_COUNT {
            if state.attacker_destroyed[lane] {
                attacking[lane].take();
            }
            if state.defender_destroyed[lane] || state.retired[lane] {
                defending[lane].take();
            } else if !defending[lane].is_empty() {
                defending[lane].set_guard_blocks(state.guard_counts[lane]);
            }
        }

        log::debug!(
            "{} attack pass: {} to defender, {} to attacker, {} event(s)",
            attacker,
            report.damage_to_defender(),
            report.damage_to_attacker(),
            report.events.len()
        );
        report
    }

    fn resolve_lane(
        &self,
        lane: usize,
        card: &CardInstance,
        def: &[Option<CardInstance>; LANE_COUNT],
        state: &mut PassState,
        report: &mut PassReport,
    ) {
        let opposing = def[lane].as_ref();

        if card.is_guard() && opposing.is_some() {
            report.events.push(CombatEvent::GuardHeld {
                lane,
                card: card.name().to_string(),
            });
            return;
        }

        let power = card.attack_power();
        let contested = card.is_thief() || opposing.is_some();
        let blocker = if contested {
            self.find_blocker(lane, def, state)
        } else {
            None
        };

        if let Some((guard_lane, guard)) = blocker {
            state.guard_counts[guard_lane] += 1;
            report.guard_blocks += 1;

            let destroyed = power <= guard.attack_power();
            report.events.push(CombatEvent::GuardBlock {
                lane,
                guard_lane,
                guard: guard.name().to_string(),
                attacker: card.name().to_string(),
                thief: card.is_thief(),
                attacker_destroyed: destroyed,
                blocks: state.guard_counts[guard_lane],
                cap: self.block_cap,
            });
            if destroyed {
                state.attacker_destroyed[lane] = true;
                report.attackers_destroyed += 1;
                Self::backfire(lane, card, report);
            }

            if state.guard_counts[guard_lane] >= self.block_cap {
                state.retired[guard_lane] = true;
                report.guards_retired += 1;
                report.events.push(CombatEvent::GuardRetired {
                    lane: guard_lane,
                    guard: guard.name().to_string(),
                    cap: self.block_cap,
                });
            }
            return;
        }

        match opposing {
            _ if card.is_thief() => {
                report.thief_damage = report.thief_damage.saturating_add(power);
                report.events.push(CombatEvent::ThiefBypass {
                    lane,
                    card: card.name().to_string(),
                    damage: power,
                });
            }
            None => {
                report.direct_damage = report.direct_damage.saturating_add(power);
                report.events.push(CombatEvent::DirectHit {
                    lane,
                    card: card.name().to_string(),
                    damage: power,
                });
            }
            Some(defender) => {
                let defender_power = defender.attack_power();
                let result = match power.cmp(&defender_power) {
                    std::cmp::Ordering::Greater => ClashResult::AttackerWins,
                    std::cmp::Ordering::Less => ClashResult::DefenderWins,
                    std::cmp::Ordering::Equal => ClashResult::Trade,
                };
                report.events.push(CombatEvent::Clash {
                    lane,
                    attacker: card.name().to_string(),
                    attacker_power: power,
                    defender: defender.name().to_string(),
                    defender_power,
                    result,
                });

                if result != ClashResult::DefenderWins {
                    state.defender_destroyed[lane] = true;
                    report.defenders_destroyed += 1;
                    Self::backfire(lane, defender, report);
                }
                if result != ClashResult::AttackerWins {
                    state.attacker_destroyed[lane] = true;
                    report.attackers_destroyed += 1;
                    Self::backfire(lane, card, report);
                }
            }
        }
    }

    /// First un-saturated defending Guard in range: same lane, left, right.
    fn find_blocker<'a>(
        &self,
        lane: usize,
        def: &'a [Option<CardInstance>; LANE_COUNT],
        state: &PassState,
    ) -> Option<(usize, &'a CardInstance)> {
        let candidates = [Some(lane), lane.checked_sub(1), Some(lane + 1)];
        candidates
            .into_iter()
            .flatten()
            .filter(|&i| i < LANE_COUNT)
            .filter(|&i| !state.retired[i] && !state.defender_destroyed[i])
            .filter(|&i| state.guard_counts[i] < self.block_cap)
            .find_map(|i| def[i].as_ref().filter(|c| c.is_guard()).map(|c| (i, c)))
    }

    /// Curse damage for a destroyed card, credited against its owner's
    /// opponent.
    fn backfire(lane: usize, card: &CardInstance, report: &mut PassReport) {
        if !card.is_curse() {
            return;
        }
        let damage = card.attack_power();
        if card.owner == report.attacker {
            report.curse_to_defender = report.curse_to_defender.saturating_add(damage);
        } else {
            report.curse_to_attacker = report.curse_to_attacker.saturating_add(damage);
        }
        report.events.push(CombatEvent::CurseBackfire {
            lane,
            card: card.name().to_string(),
            owner: card.owner,
            damage,
        });
    }
}
