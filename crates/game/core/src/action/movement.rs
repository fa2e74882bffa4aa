use std::collections::VecDeque;

use crate::env::GridIndex;
use crate::state::Position;

/// Why a dequeued step was dropped instead of starting a transit.
///
/// Rejections are steady-state behaviour (walls, hazards, locks), never failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StepRejection {
    #[error("direction {direction} is locked at {origin}")]
    DirectionLocked {
        origin: Position,
        direction: CardinalDirection,
    },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },
}

/// Unit step on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}

/// Result of resolving the head of the [`MovementQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted {
        direction: CardinalDirection,
        destination: Position,
    },
    Rejected {
        direction: CardinalDirection,
        reason: StepRejection,
    },
}

/// FIFO of pending unit steps.
///
/// Unbounded and never coalesced: three pushes of the same direction stay three
/// entries. At most one entry is resolved per call to [`MovementQueue::try_advance`],
/// and a rejected entry is discarded rather than retried.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementQueue {
    pending: VecDeque<CardinalDirection>,
}

impl MovementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: CardinalDirection) {
        self.pending.push_back(direction);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardinalDirection> + '_ {
        self.pending.iter().copied()
    }

    /// Pops the head direction and validates it against `grid` from `current`.
    ///
    /// Must only be called while the entity is idle. Returns `None` when the
    /// queue is empty.
    pub fn try_advance(&mut self, current: Position, grid: &GridIndex) -> Option<StepOutcome> {
        let direction = self.pending.pop_front()?;

        if grid.is_direction_locked(current, direction) {
            return Some(StepOutcome::Rejected {
                direction,
                reason: StepRejection::DirectionLocked {
                    origin: current,
                    direction,
                },
            });
        }

        let destination = current + direction;
        let rejection = if !grid.is_in_bounds(destination) {
            Some(StepRejection::OutOfBounds { destination })
        } else if grid.is_blocked(destination) {
            Some(StepRejection::Blocked { destination })
        } else {
            None
        };

        Some(match rejection {
            Some(reason) => StepOutcome::Rejected { direction, reason },
            None => StepOutcome::Accepted {
                direction,
                destination,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BlockingSide, MapDimensions};

    fn lava_grid() -> GridIndex {
        GridIndex::builder(MapDimensions::new(16, 7))
            .occupied(Position::new(3, 2))
            .lock(BlockingSide::Left, Position::new(2, 2))
            .build()
    }

    #[test]
    fn resolves_one_entry_per_call() {
        let grid = lava_grid();
        let mut queue = MovementQueue::new();
        for _ in 0..5 {
            queue.push(CardinalDirection::North);
        }

        let outcome = queue.try_advance(Position::new(1, 2), &grid);
        assert!(matches!(outcome, Some(StepOutcome::Accepted { .. })));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn rejected_step_is_discarded() {
        let grid = lava_grid();
        let mut queue = MovementQueue::new();
        queue.push(CardinalDirection::South);
        queue.push(CardinalDirection::East);

        // From the bottom row, south leaves the map
        let outcome = queue.try_advance(Position::new(5, 0), &grid);
        assert_eq!(
            outcome,
            Some(StepOutcome::Rejected {
                direction: CardinalDirection::South,
                reason: StepRejection::OutOfBounds {
                    destination: Position::new(5, -1)
                },
            })
        );
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![CardinalDirection::East]);
    }

    #[test]
    fn hazard_cells_are_blocked() {
        let grid = lava_grid();
        let mut queue = MovementQueue::new();
        queue.push(CardinalDirection::North);

        let outcome = queue.try_advance(Position::new(3, 1), &grid);
        assert_eq!(
            outcome,
            Some(StepOutcome::Rejected {
                direction: CardinalDirection::North,
                reason: StepRejection::Blocked {
                    destination: Position::new(3, 2)
                },
            })
        );
    }

    #[test]
    fn locked_direction_never_accepted_from_locked_cell() {
        let grid = lava_grid();
        let mut queue = MovementQueue::new();
        queue.push(CardinalDirection::East);
        queue.push(CardinalDirection::West);

        let locked = queue.try_advance(Position::new(2, 2), &grid);
        assert!(matches!(
            locked,
            Some(StepOutcome::Rejected {
                reason: StepRejection::DirectionLocked { .. },
                ..
            })
        ));

        // Other directions from the same cell are unaffected
        let free = queue.try_advance(Position::new(2, 2), &grid);
        assert!(matches!(free, Some(StepOutcome::Accepted { .. })));
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let grid = lava_grid();
        let mut queue = MovementQueue::new();
        assert_eq!(queue.try_advance(Position::ORIGIN, &grid), None);
    }
}
