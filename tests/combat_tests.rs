//! Combat resolution integration tests.
//!
//! These drive `CombatResolver` directly on hand-built lanes, the way the
//! controller does after the battle reveal.

use lane_ccg::cards::{Attribute, AttributeSet, CardDefinition, CardId, CardInstance};
use lane_ccg::combat::{ClashResult, CombatEvent, CombatResolver};
use lane_ccg::core::{InstanceAllocator, Side, SideState};
use lane_ccg::zones::Lanes;

struct Board {
    ids: InstanceAllocator,
    human: Lanes,
    opponent: Lanes,
}

impl Board {
    fn new() -> Self {
        Self {
            ids: InstanceAllocator::new(),
            human: Lanes::new(),
            opponent: Lanes::new(),
        }
    }

    fn put(&mut self, side: Side, lane: usize, name: &str, power: u32, attrs: &[Attribute]) {
        let id = self.ids.alloc();
        let def = CardDefinition::new(CardId::new(id.raw()), name)
            .with_power(power)
            .with_attributes(attrs.iter().copied().collect::<AttributeSet>());
        let card = CardInstance::new(id, def, side);
        let lanes = match side {
            Side::Human => &mut self.human,
            Side::Opponent => &mut self.opponent,
        };
        lanes[lane].place(card, false, 1).unwrap();
    }
}

/// Scenario: power 5 against power 3, no attributes.
#[test]
fn test_stronger_attacker_destroys_defender_without_damage() {
    let mut board = Board::new();
    board.put(Side::Human, 1, "Brute", 5, &[]);
    board.put(Side::Opponent, 1, "Squire", 3, &[]);

    let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut board.human, &mut board.opponent);

    assert!(board.opponent[1].is_empty(), "defender should be destroyed");
    assert_eq!(board.human.card(1).map(|c| c.name()), Some("Brute"));
    assert_eq!(report.damage_to_defender(), 0);
    assert_eq!(report.damage_to_attacker(), 0);
    assert!(matches!(
        report.events.as_slice(),
        [CombatEvent::Clash { result: ClashResult::AttackerWins, .. }]
    ));
}

/// Scenario: an unguarded Thief hits life directly, even across an
/// occupied lane.
#[test]
fn test_unguarded_thief_deals_exact_power() {
    let mut board = Board::new();
    board.put(Side::Human, 0, "Pickpocket", 4, &[Attribute::Thief]);
    board.put(Side::Opponent, 0, "Sentry", 9, &[]);
    board.put(Side::Opponent, 2, "Far Guard", 9, &[Attribute::Guard]);

    let mut defender = SideState::new(100, 4, 20);
    defender.lanes = board.opponent.clone();
    let report =
        CombatResolver::new(3).resolve_pass(Side::Human, &mut board.human, &mut defender.lanes);
    defender.apply_damage(report.damage_to_defender());

    assert_eq!(defender.life, 96);
    assert_eq!(report.thief_damage, 4);
    assert_eq!(defender.lanes.occupied(), 2, "Thief leaves the lane card alone");
    assert!(board.human.card(0).is_some());
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::Clash { .. })));
}

/// Scenario: a Guard blocks the same attacker over three passes, then
/// retires and the fourth attack lands.
#[test]
fn test_guard_retires_after_three_blocks() {
    let mut board = Board::new();
    board.put(Side::Human, 0, "Ogre", 5, &[]);
    board.put(Side::Opponent, 0, "Shieldbearer", 2, &[Attribute::Guard]);
    let resolver = CombatResolver::new(3);

    for expected in 1..=2u8 {
        let report = resolver.resolve_pass(Side::Human, &mut board.human, &mut board.opponent);
        assert_eq!(report.guard_blocks, 1);
        assert_eq!(report.damage_to_defender(), 0);
        assert_eq!(board.opponent[0].guard_blocks(), expected);
    }

    let third = resolver.resolve_pass(Side::Human, &mut board.human, &mut board.opponent);
    assert_eq!(third.guards_retired, 1);
    assert!(board.opponent[0].is_empty());
    assert!(third.events.iter().any(|e| matches!(
        e,
        CombatEvent::GuardBlock { blocks: 3, cap: 3, attacker_destroyed: false, .. }
    )));

    let fourth = resolver.resolve_pass(Side::Human, &mut board.human, &mut board.opponent);
    assert_eq!(fourth.guard_blocks, 0);
    assert_eq!(fourth.direct_damage, 5);
}

/// Scenario: a destroyed Curse card damages the side that did not own it,
/// whichever side destroyed it.
#[test]
fn test_curse_backfires_on_the_other_side() {
    // Defender's Curse dies to a stronger attacker.
    let mut board = Board::new();
    board.put(Side::Human, 2, "Knight", 6, &[]);
    board.put(Side::Opponent, 2, "Hexed Doll", 3, &[Attribute::Curse]);

    let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut board.human, &mut board.opponent);

    assert_eq!(report.damage_to_attacker(), 3);
    assert_eq!(report.damage_to(Side::Human), 3);
    assert_eq!(report.damage_to(Side::Opponent), 0);

    // Attacker's own Curse dies to a stronger defender.
    let mut board = Board::new();
    board.put(Side::Human, 0, "Cursed Imp", 3, &[Attribute::Curse]);
    board.put(Side::Opponent, 0, "Troll", 7, &[]);

    let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut board.human, &mut board.opponent);

    assert_eq!(report.damage_to(Side::Opponent), 3);
    assert_eq!(report.damage_to(Side::Human), 0);
    assert!(board.human[0].is_empty());
}

#[test]
fn test_cursed_thief_blocked_and_destroyed_backfires() {
    let mut board = Board::new();
    board.put(Side::Opponent, 1, "Cursed Cutpurse", 2, &[Attribute::Thief, Attribute::Curse]);
    board.put(Side::Human, 0, "Warden", 4, &[Attribute::Guard]);

    let report =
        CombatResolver::new(3).resolve_pass(Side::Opponent, &mut board.opponent, &mut board.human);

    assert!(board.opponent[1].is_empty());
    assert_eq!(board.human[0].guard_blocks(), 1);
    assert_eq!(report.damage_to(Side::Human), 2, "backfire lands on the Guard's side");
    assert_eq!(report.thief_damage, 0);
}

#[test]
fn test_pass_damage_matches_unblocked_power() {
    let mut board = Board::new();
    board.put(Side::Human, 0, "A", 3, &[]);
    board.put(Side::Human, 1, "B", 0, &[]);
    board.put(Side::Human, 2, "C", 2, &[Attribute::Thief]);
    board.put(Side::Opponent, 1, "Wall", 8, &[]);

    let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut board.human, &mut board.opponent);

    // Lane 0 unopposed (3), lane 1 clashes, lane 2 Thief unguarded (2).
    assert_eq!(report.damage_to_defender(), 5);
    assert_eq!(report.direct_damage + report.thief_damage, 5);
    assert!(board.human[1].is_empty(), "zero-power card loses its clash");
}

#[test]
fn test_messages_use_one_based_lanes() {
    let mut board = Board::new();
    board.put(Side::Opponent, 2, "Raider", 4, &[]);

    let report =
        CombatResolver::new(3).resolve_pass(Side::Opponent, &mut board.opponent, &mut board.human);
    let messages: Vec<String> = report.messages().collect();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Lane 3:"), "got {messages:?}");
}
