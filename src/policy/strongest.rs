use super::{OpponentPolicy, Placement, PlacementView};
use crate::core::rng::GameRng;

/// Deterministic policy: the most powerful affordable card (cheapest on
/// ties, then lowest instance ID) into the leftmost open lane.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrongestFirstPolicy;

impl OpponentPolicy for StrongestFirstPolicy {
    fn choose(&self, view: &PlacementView<'_>, _rng: &mut GameRng) -> Placement {
        let best = view.affordable().max_by(|a, b| {
            a.power()
                .cmp(&b.power())
                .then_with(|| b.cost().cmp(&a.cost()))
                .then_with(|| b.id.cmp(&a.id))
        });
        match (best, view.open_lanes.first()) {
            (Some(card), Some(&lane)) => Placement::Place { card: card.id, lane },
            _ => Placement::Pass,
        }
    }

    fn name(&self) -> &'static str {
        "strongest-first"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardInstance};
    use crate::core::entity::InstanceId;
    use crate::core::side::Side;
    use crate::zones::Hand;
    use smallvec::smallvec;

    fn card(id: u32, power: u32, cost: u32) -> CardInstance {
        let def = CardDefinition::new(CardId::new(id), "Card")
            .with_power(power)
            .with_cost(cost);
        CardInstance::new(InstanceId(id), def, Side::Opponent)
    }

    #[test]
    fn test_picks_strongest_affordable() {
        let mut hand = Hand::new();
        hand.extend([card(1, 3, 1), card(2, 9, 8), card(3, 5, 4), card(4, 5, 2)]);
        let view = PlacementView {
            hand: &hand,
            mana: 4,
            open_lanes: smallvec![1, 2],
            round: 1,
        };

        assert_eq!(
            StrongestFirstPolicy.choose(&view, &mut GameRng::new(0)),
            Placement::Place {
                card: InstanceId(4),
                lane: 1
            }
        );
    }

    #[test]
    fn test_passes_on_empty_hand() {
        let hand = Hand::new();
        let view = PlacementView {
            hand: &hand,
            mana: 10,
            open_lanes: smallvec![0],
            round: 3,
        };

        assert_eq!(StrongestFirstPolicy.choose(&view, &mut GameRng::new(0)), Placement::Pass);
    }
}
