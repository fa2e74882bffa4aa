use crate::action::CardinalDirection;
use crate::state::{PixelPosition, Position};

/// Whether the entity is between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TransitState {
    #[default]
    Idle,
    Transiting {
        direction: CardinalDirection,
        target: Position,
        target_pixel: PixelPosition,
    },
}

impl TransitState {
    pub fn is_transiting(&self) -> bool {
        matches!(self, TransitState::Transiting { .. })
    }
}

/// Continuous on-screen position that trails the committed grid cell.
///
/// Moves at a constant linear speed and snaps onto the target once the
/// remaining distance on an axis fits in one tick, so arrival is exact and
/// never overshoots.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Interpolator {
    position: PixelPosition,
    transit: TransitState,
}

impl Interpolator {
    /// Resting interpolator at `position`.
    pub fn at(position: PixelPosition) -> Self {
        Self {
            position,
            transit: TransitState::Idle,
        }
    }

    pub fn position(&self) -> PixelPosition {
        self.position
    }

    pub fn transit(&self) -> TransitState {
        self.transit
    }

    pub fn is_transiting(&self) -> bool {
        self.transit.is_transiting()
    }

    /// Starts a transit from the current position towards `target_pixel`.
    pub fn begin(
        &mut self,
        direction: CardinalDirection,
        target: Position,
        target_pixel: PixelPosition,
    ) {
        self.transit = TransitState::Transiting {
            direction,
            target,
            target_pixel,
        };
    }

    /// Advances by `dt` seconds at `speed` pixels per second.
    ///
    /// Returns `true` on the tick the target is reached.
    pub fn tick(&mut self, dt: f32, speed: f32) -> bool {
        let TransitState::Transiting { target_pixel, .. } = self.transit else {
            return false;
        };

        let step = (speed * dt).max(0.0);
        self.position.px = approach(self.position.px, target_pixel.px, step);
        self.position.py = approach(self.position.py, target_pixel.py, step);

        if self.position == target_pixel {
            self.transit = TransitState::Idle;
            true
        } else {
            false
        }
    }
}

fn approach(current: f32, target: f32, step: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= step {
        target
    } else {
        current + step.copysign(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn idle_tick_is_noop() {
        let mut interpolator = Interpolator::at(PixelPosition::new(10.0, 10.0));
        assert!(!interpolator.tick(DT, 200.0));
        assert_eq!(interpolator.position(), PixelPosition::new(10.0, 10.0));
    }

    #[test]
    fn converges_without_overshoot() {
        let start = PixelPosition::new(50.0, 200.0);
        let target = PixelPosition::new(100.0, 200.0);
        let mut interpolator = Interpolator::at(start);
        interpolator.begin(CardinalDirection::East, Position::new(2, 2), target);

        // 50px at 200px/s is 0.25s, i.e. 15 ticks at 60Hz (+1 for rounding)
        let mut ticks = 0;
        while interpolator.is_transiting() {
            interpolator.tick(DT, 200.0);
            ticks += 1;
            let position = interpolator.position();
            assert!(position.px <= target.px, "overshot on tick {ticks}");
            assert_eq!(position.py, target.py);
            assert!(ticks <= 16, "did not converge");
        }

        assert!(ticks >= 15);
        assert_eq!(interpolator.position(), target);
        assert_eq!(interpolator.transit(), TransitState::Idle);
    }

    #[test]
    fn moves_towards_smaller_coordinates() {
        let mut interpolator = Interpolator::at(PixelPosition::new(50.0, 200.0));
        let target = PixelPosition::new(50.0, 150.0);
        interpolator.begin(CardinalDirection::North, Position::new(1, 3), target);

        interpolator.tick(0.1, 200.0);
        assert_eq!(interpolator.position(), PixelPosition::new(50.0, 180.0));
        assert!(interpolator.tick(1.0, 200.0));
        assert_eq!(interpolator.position(), target);
    }

    #[test]
    fn negative_dt_does_not_move() {
        let mut interpolator = Interpolator::at(PixelPosition::new(0.0, 0.0));
        interpolator.begin(
            CardinalDirection::East,
            Position::new(1, 0),
            PixelPosition::new(50.0, 0.0),
        );
        assert!(!interpolator.tick(-1.0, 200.0));
        assert_eq!(interpolator.position(), PixelPosition::new(0.0, 0.0));
    }
}
