use super::{OpponentPolicy, Placement, PlacementView};
use crate::core::rng::GameRng;

/// Uniformly random affordable card into a uniformly random open lane.
///
/// Passes when nothing is affordable or every lane is taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose(&self, view: &PlacementView<'_>, rng: &mut GameRng) -> Placement {
        let affordable: Vec<_> = view.affordable().collect();
        let (Some(card), Some(lane)) = (rng.choose(&affordable), rng.choose(&view.open_lanes))
        else {
            return Placement::Pass;
        };
        Placement::Place {
            card: card.id,
            lane: *lane,
        }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
