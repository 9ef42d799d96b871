//! Attack pass and full-round benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use lane_ccg::cards::{AttributeSet, CardDefinition, CardId, CardInstance};
use lane_ccg::combat::CombatResolver;
use lane_ccg::core::{Command, DeckId, InstanceAllocator, MatchConfig, Phase, Side};
use lane_ccg::rules::MatchController;
use lane_ccg::zones::{DeckEntry, Lanes};
use lane_ccg::CardCatalog;

fn lanes(owner: Side, cards: [(u32, AttributeSet); 3], ids: &mut InstanceAllocator) -> Lanes {
    let mut lanes = Lanes::new();
    for (lane, (power, attributes)) in cards.into_iter().enumerate() {
        let id = ids.alloc();
        let def = CardDefinition::new(CardId::new(id.raw()), "Bench")
            .with_power(power)
            .with_attributes(attributes);
        let _ = lanes[lane].place(CardInstance::new(id, def, owner), false, 1);
    }
    lanes
}

fn bench_attack_pass(c: &mut Criterion) {
    let mut ids = InstanceAllocator::new();
    let attacking = lanes(
        Side::Human,
        [
            (4, AttributeSet::from_flags(false, true, false)),
            (5, AttributeSet::EMPTY),
            (3, AttributeSet::from_flags(false, false, true)),
        ],
        &mut ids,
    );
    let defending = lanes(
        Side::Opponent,
        [
            (2, AttributeSet::from_flags(true, false, false)),
            (5, AttributeSet::from_flags(false, false, true)),
            (6, AttributeSet::EMPTY),
        ],
        &mut ids,
    );
    let resolver = CombatResolver::new(3);

    c.bench_function("attack_pass", |b| {
        b.iter_batched(
            || (attacking.clone(), defending.clone()),
            |(mut att, mut def)| black_box(resolver.resolve_pass(Side::Human, &mut att, &mut def)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_first_round(c: &mut Criterion) {
    let imp = CardDefinition::new(CardId::new(1), "Imp").with_power(2).with_cost(1);
    let catalog: CardCatalog = [imp.clone()].into_iter().collect();
    let entries = [DeckEntry::new(imp, 20)];

    c.bench_function("first_round", |b| {
        b.iter(|| {
            let mut controller = MatchController::new(MatchConfig::default(), 42).ok()?;
            controller.start(DeckId(1), &entries, &catalog).ok()?;
            controller.apply(Command::ConfirmCoinToss).ok()?;
            while controller.phase() != Phase::RoundEnd && !controller.is_over() {
                if controller.pending() > 0 {
                    controller.settle();
                } else {
                    controller.apply(Command::PassTurn).ok()?;
                }
            }
            Some(black_box(controller.round()))
        })
    });
}

criterion_group!(benches, bench_attack_pass, bench_first_round);
criterion_main!(benches);
