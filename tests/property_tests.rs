//! Property-based tests for combat, draws and whole matches.

use lane_ccg::cards::{AttributeSet, CardDefinition, CardId, CardInstance};
use lane_ccg::combat::CombatResolver;
use lane_ccg::core::{
    Command, DeckId, GameRng, InstanceAllocator, MatchConfig, Phase, Side, UserId,
};
use lane_ccg::provider::{CardRecord, DeckCardRecord, InMemoryProvider, InMemoryWallet};
use lane_ccg::session::ArenaSession;
use lane_ccg::zones::{Deck, Lanes};
use lane_ccg::LANE_COUNT;
use proptest::prelude::*;

/// Power and attribute flags of one lane card.
type Slot = Option<(u32, bool, bool, bool)>;

fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop::option::of((0u32..=8, any::<bool>(), any::<bool>(), any::<bool>()))
}

fn board_strategy() -> impl Strategy<Value = [Slot; LANE_COUNT]> {
    prop::array::uniform3(slot_strategy())
}

/// Same as `board_strategy` but without Guards or Curses.
fn plain_board_strategy() -> impl Strategy<Value = [Slot; LANE_COUNT]> {
    board_strategy()
        .prop_map(|slots| slots.map(|s| s.map(|(power, _, thief, _)| (power, false, thief, false))))
}

fn build(slots: &[Slot; LANE_COUNT], owner: Side, ids: &mut InstanceAllocator) -> Lanes {
    let mut lanes = Lanes::new();
    for (lane, slot) in slots.iter().enumerate() {
        let Some((power, guard, thief, curse)) = *slot else {
            continue;
        };
        let id = ids.alloc();
        let def = CardDefinition::new(CardId::new(id.raw()), format!("{owner} {lane}"))
            .with_power(power)
            .with_attributes(AttributeSet::from_flags(guard, thief, curse));
        lanes[lane]
            .place(CardInstance::new(id, def, owner), false, 1)
            .unwrap();
    }
    lanes
}

proptest! {
    #[test]
    fn test_pass_damage_adds_up(att in board_strategy(), def in board_strategy()) {
        let mut ids = InstanceAllocator::new();
        let mut attacking = build(&att, Side::Human, &mut ids);
        let mut defending = build(&def, Side::Opponent, &mut ids);
        let ceiling: u32 = attacking.cards().map(|c| c.attack_power()).sum();

        let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut attacking, &mut defending);

        prop_assert_eq!(
            report.damage_to_defender(),
            report.direct_damage + report.thief_damage + report.curse_to_defender
        );
        prop_assert!(report.direct_damage + report.thief_damage <= ceiling);
        prop_assert_eq!(report.damage_to(Side::Human), report.curse_to_attacker);
    }

    #[test]
    fn test_unblocked_damage_without_guards(att in plain_board_strategy(), def in plain_board_strategy()) {
        let mut ids = InstanceAllocator::new();
        let mut attacking = build(&att, Side::Human, &mut ids);
        let mut defending = build(&def, Side::Opponent, &mut ids);

        let expected: u32 = (0..LANE_COUNT)
            .filter_map(|lane| {
                let (power, _, thief, _) = att[lane]?;
                (thief || def[lane].is_none()).then_some(power.max(1))
            })
            .sum();

        let report = CombatResolver::new(3).resolve_pass(Side::Human, &mut attacking, &mut defending);

        prop_assert_eq!(report.damage_to_defender(), expected);
        prop_assert_eq!(report.damage_to_attacker(), 0);
        prop_assert_eq!(report.guard_blocks, 0);
    }

    #[test]
    fn test_guard_counts_stay_below_cap(
        att in board_strategy(),
        def in board_strategy(),
        cap in 1u8..=4,
        passes in 1usize..=6,
    ) {
        let mut ids = InstanceAllocator::new();
        let mut attacking = build(&att, Side::Human, &mut ids);
        let mut defending = build(&def, Side::Opponent, &mut ids);
        let resolver = CombatResolver::new(cap);

        for _ in 0..passes {
            let report = resolver.resolve_pass(Side::Human, &mut attacking, &mut defending);
            prop_assert!(report.guards_retired <= report.guard_blocks);
            for (_, lane) in defending.iter() {
                prop_assert!(lane.guard_blocks() < cap);
            }
        }
    }

    #[test]
    fn test_draw_never_overdraws(size in 0u32..=20, owed in 0usize..=6, seed in any::<u64>()) {
        let mut ids = InstanceAllocator::new();
        let cards = (0..size).map(|i| {
            CardInstance::new(ids.alloc(), CardDefinition::new(CardId::new(i), "Card"), Side::Human)
        });
        let mut deck = Deck::from_cards(cards, 20);
        let mut rng = GameRng::new(seed);

        let before = deck.len();
        let drawn = deck.draw(owed, &mut rng);

        prop_assert_eq!(drawn.len(), owed.min(before));
        prop_assert_eq!(deck.len(), before - drawn.len());
        for card in &drawn {
            prop_assert!(!deck.contains(card.id));
        }
    }
}

// === Whole matches ===

const USER: UserId = UserId(1);

fn arena_provider() -> InMemoryProvider {
    let catalog = vec![
        CardRecord::new(1, "Pebble", 1, 1),
        CardRecord::new(2, "Shieldbearer", 3, 2).with_flags(true, false, false),
        CardRecord::new(3, "Night Thief", 2, 3).with_flags(false, true, false),
        CardRecord::new(4, "Hexed Doll", 3, 4).with_flags(false, false, true),
        CardRecord::new(5, "Ogre", 6, 5),
        CardRecord::new(6, "Warden Golem", 7, 7).with_flags(true, false, true),
    ];
    let deck = catalog
        .iter()
        .cloned()
        .map(|card| DeckCardRecord { card, quantity: 4 })
        .collect();
    InMemoryProvider::new()
        .with_catalog(catalog)
        .with_deck(USER, DeckId(1), deck)
}

/// Play a match with the human choosing at random; returns the session.
fn random_match(seed: u64) -> ArenaSession<InMemoryProvider, InMemoryWallet> {
    let mut session = ArenaSession::new(
        USER,
        arena_provider(),
        InMemoryWallet::new(),
        MatchConfig::default().with_starting_life(40),
        seed,
    )
    .unwrap();
    let mut picks = GameRng::new(seed ^ 0x5eed);
    session.submit(Command::SelectDeck { deck_id: DeckId(1) }).unwrap();

    let mut life = (40, 40);
    for _ in 0..2_000 {
        if session.result().is_some() {
            break;
        }
        if session.controller().pending() > 0 {
            session.advance(500);
        } else {
            let view = session.view();
            let command = match view.phase {
                Phase::CoinToss => Command::ConfirmCoinToss,
                Phase::RoundEnd => {
                    let candidates = session.controller().retention_candidates();
                    match picks.choose(&candidates) {
                        Some(&card) if picks.gen_bool(0.5) => Command::RetainCard { card },
                        _ => Command::SkipRetain,
                    }
                }
                Phase::Placement => {
                    let legal = session.controller().legal_placements();
                    match picks.choose(&legal) {
                        Some(&(card, lane)) if picks.gen_bool(0.8) => Command::PlaceCard { card, lane },
                        _ => Command::PassTurn,
                    }
                }
                other => panic!("no pending step in {other}"),
            };
            session.submit(command).unwrap();
        }

        let view = session.view();
        assert!(view.human.life <= life.0 && view.opponent.life <= life.1);
        life = (view.human.life, view.opponent.life);
    }
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_random_matches_end_exactly_once(seed in any::<u64>()) {
        let mut session = random_match(seed);

        let result = session.result().cloned();
        prop_assert!(result.is_some());
        let result = result.unwrap();
        prop_assert!(session.view().phase.is_terminal());

        session.settle();
        let grants = session.rewards().grants().len();
        prop_assert_eq!(grants, usize::from(result.is_victory()));
        prop_assert_eq!(session.controller().pending(), 0);

        if result.is_victory() {
            prop_assert_eq!(result.enemy_final_life, 0);
            prop_assert_eq!(result.gems_earned, 30);
        } else {
            prop_assert_eq!(result.gems_earned, 0);
        }
        prop_assert_eq!(result.stats.rounds_played, session.view().round);
    }

    #[test]
    fn test_same_seed_same_match(seed in any::<u64>()) {
        let a = random_match(seed);
        let b = random_match(seed);

        prop_assert_eq!(a.result(), b.result());
        prop_assert_eq!(&a.controller().state().history, &b.controller().state().history);
    }
}
