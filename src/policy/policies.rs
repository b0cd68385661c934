//! Move policies.

use crate::core::{Direction, GameRng, GameState};

/// Picks the next move for a game in progress.
pub trait MovePolicy {
    /// Choose a direction that can move.
    ///
    /// Returns `None` if no direction changes the grid.
    fn choose(&self, state: &GameState, rng: &mut GameRng) -> Option<Direction>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Uniform choice among movable directions.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(&self, state: &GameState, rng: &mut GameRng) -> Option<Direction> {
        let dirs: Vec<Direction> = state.movable_directions().collect();
        rng.choose(&dirs).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// The movable direction whose move merges the most tiles.
///
/// Ties go to the earliest direction in `preference`.
#[derive(Clone, Debug)]
pub struct GreedyPolicy {
    preference: [Direction; 4],
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            preference: [Direction::Down, Direction::Left, Direction::Right, Direction::Up],
        }
    }
}

impl GreedyPolicy {
    /// Greedy policy with a custom tie-break order.
    #[must_use]
    pub fn with_preference(preference: [Direction; 4]) -> Self {
        Self { preference }
    }
}

impl MovePolicy for GreedyPolicy {
    fn choose(&self, state: &GameState, _rng: &mut GameRng) -> Option<Direction> {
        let mut best: Option<(Direction, u32)> = None;
        for dir in self.preference {
            let Some((_, merges)) = state.grid().preview(dir) else {
                continue;
            };
            if best.map_or(true, |(_, m)| merges > m) {
                best = Some((dir, merges));
            }
        }
        best.map(|(dir, _)| dir)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// First movable direction from a fixed list.
#[derive(Clone, Debug)]
pub struct OrderedPolicy {
    order: Vec<Direction>,
}

impl Default for OrderedPolicy {
    fn default() -> Self {
        Self {
            order: vec![Direction::Down, Direction::Left, Direction::Right, Direction::Up],
        }
    }
}

impl OrderedPolicy {
    /// Ordered policy over a custom list. Directions left out are never played.
    #[must_use]
    pub fn new(order: Vec<Direction>) -> Self {
        Self { order }
    }
}

impl MovePolicy for OrderedPolicy {
    fn choose(&self, state: &GameState, _rng: &mut GameRng) -> Option<Direction> {
        self.order.iter().copied().find(|&dir| state.can_move(dir))
    }

    fn name(&self) -> &'static str {
        "ordered"
    }
}
