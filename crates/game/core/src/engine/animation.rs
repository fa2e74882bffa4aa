use std::collections::HashMap;
use std::fmt;

use crate::action::CardinalDirection;
use crate::config::MotionConfig;

/// Identifier of one sprite frame, e.g. `"310"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Idle pose plus one walking cycle per direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSet {
    idle: FrameId,
    cycles: HashMap<CardinalDirection, Vec<FrameId>>,
}

impl AnimationSet {
    pub fn new(idle: FrameId) -> Self {
        Self {
            idle,
            cycles: HashMap::new(),
        }
    }

    /// Frame table of the bundled character sprite sheet.
    pub fn reference() -> Self {
        Self::new(FrameId::new("300"))
            .with_cycle(CardinalDirection::North, ["310", "311"])
            .with_cycle(CardinalDirection::East, ["320", "321"])
            .with_cycle(CardinalDirection::West, ["330", "331"])
            .with_cycle(CardinalDirection::South, ["340", "341"])
    }

    pub fn with_cycle<I, S>(mut self, direction: CardinalDirection, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_cycle(direction, frames.into_iter().map(|id| FrameId(id.into())).collect());
        self
    }

    /// Replaces the cycle for `direction`; an empty list unregisters it.
    pub fn set_cycle(&mut self, direction: CardinalDirection, frames: Vec<FrameId>) {
        if frames.is_empty() {
            self.cycles.remove(&direction);
        } else {
            self.cycles.insert(direction, frames);
        }
    }

    pub fn set_idle(&mut self, idle: FrameId) {
        self.idle = idle;
    }

    pub fn idle(&self) -> &FrameId {
        &self.idle
    }

    pub fn cycle(&self, direction: CardinalDirection) -> Option<&[FrameId]> {
        self.cycles.get(&direction).map(Vec::as_slice)
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::reference()
    }
}

/// Displayed animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Walking {
        direction: CardinalDirection,
        frame_index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
enum Phase {
    /// Standing pose.
    #[default]
    Resting,
    Walking,
    /// Transit ended; last walking frame stays up until the idle delay passes.
    Residual { idle_elapsed: f32 },
}

/// Chooses the displayed frame from transit state and elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AnimationFsm {
    phase: Phase,
    last_direction: Option<CardinalDirection>,
    frame_index: usize,
    frame_timer: f32,
}

impl AnimationFsm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters walking for a freshly committed step, restarting the cycle.
    pub fn begin(&mut self, direction: CardinalDirection) {
        self.phase = Phase::Walking;
        self.last_direction = Some(direction);
        self.frame_index = 0;
        self.frame_timer = 0.0;
    }

    /// Advances timers by `dt` given whether a transit is in progress.
    pub fn tick(&mut self, dt: f32, transiting: bool, animations: &AnimationSet, motion: &MotionConfig) {
        if transiting {
            self.phase = Phase::Walking;
            self.frame_timer += dt;
            if self.frame_timer >= motion.anim_interval {
                self.frame_timer -= motion.anim_interval;
                if let Some(frames) = self.last_direction.and_then(|d| animations.cycle(d)) {
                    self.frame_index = (self.frame_index + 1) % frames.len();
                }
            }
            return;
        }

        let idle_elapsed = match self.phase {
            Phase::Resting => return,
            Phase::Walking => dt,
            Phase::Residual { idle_elapsed } => idle_elapsed + dt,
        };
        self.phase = if idle_elapsed >= motion.idle_delay {
            Phase::Resting
        } else {
            Phase::Residual { idle_elapsed }
        };
    }

    pub fn state(&self) -> AnimationState {
        match (self.phase, self.last_direction) {
            (Phase::Walking | Phase::Residual { .. }, Some(direction)) => AnimationState::Walking {
                direction,
                frame_index: self.frame_index,
            },
            _ => AnimationState::Idle,
        }
    }

    /// Frame to draw, falling back to the idle pose when no cycle is registered.
    pub fn current_frame<'a>(&self, animations: &'a AnimationSet) -> &'a FrameId {
        match self.state() {
            AnimationState::Walking {
                direction,
                frame_index,
            } => animations
                .cycle(direction)
                .and_then(|frames| frames.get(frame_index))
                .unwrap_or(animations.idle()),
            AnimationState::Idle => animations.idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn motion() -> MotionConfig {
        MotionConfig {
            anim_interval: 0.05,
            idle_delay: 0.5,
            ..MotionConfig::default()
        }
    }

    #[test]
    fn starts_idle() {
        let fsm = AnimationFsm::new();
        let animations = AnimationSet::reference();
        assert_eq!(fsm.state(), AnimationState::Idle);
        assert_eq!(fsm.current_frame(&animations).as_str(), "300");
    }

    #[test]
    fn walking_cycles_frames() {
        let animations = AnimationSet::reference();
        let motion = motion();
        let mut fsm = AnimationFsm::new();
        fsm.begin(CardinalDirection::East);
        assert_eq!(fsm.current_frame(&animations).as_str(), "320");

        fsm.tick(0.06, true, &animations, &motion);
        assert_eq!(fsm.current_frame(&animations).as_str(), "321");
        fsm.tick(0.06, true, &animations, &motion);
        assert_eq!(fsm.current_frame(&animations).as_str(), "320");
    }

    #[test]
    fn residual_pose_then_idle() {
        let animations = AnimationSet::reference();
        let motion = motion();
        let mut fsm = AnimationFsm::new();
        fsm.begin(CardinalDirection::North);
        fsm.tick(0.06, true, &animations, &motion);
        assert_eq!(fsm.current_frame(&animations).as_str(), "311");

        // Below the delay the last walking frame is still shown
        let mut idle = 0.0;
        while idle + DT < motion.idle_delay {
            fsm.tick(DT, false, &animations, &motion);
            idle += DT;
            assert_eq!(fsm.current_frame(&animations).as_str(), "311");
        }

        for _ in 0..3 {
            fsm.tick(DT, false, &animations, &motion);
        }
        assert_eq!(fsm.state(), AnimationState::Idle);

        // Stays idle without a new walking transition
        for _ in 0..120 {
            fsm.tick(DT, false, &animations, &motion);
            assert_eq!(fsm.current_frame(&animations).as_str(), "300");
        }
    }

    #[test]
    fn new_step_restarts_cycle() {
        let animations = AnimationSet::reference();
        let motion = motion();
        let mut fsm = AnimationFsm::new();
        fsm.begin(CardinalDirection::West);
        fsm.tick(0.06, true, &animations, &motion);
        fsm.tick(DT, false, &animations, &motion);
        assert_eq!(fsm.current_frame(&animations).as_str(), "331");

        fsm.begin(CardinalDirection::South);
        assert_eq!(
            fsm.state(),
            AnimationState::Walking {
                direction: CardinalDirection::South,
                frame_index: 0
            }
        );
        assert_eq!(fsm.current_frame(&animations).as_str(), "340");
    }

    #[test]
    fn missing_cycle_falls_back_to_idle() {
        let mut animations = AnimationSet::reference();
        animations.set_cycle(CardinalDirection::East, Vec::new());
        let motion = motion();
        let mut fsm = AnimationFsm::new();
        fsm.begin(CardinalDirection::East);
        fsm.tick(0.06, true, &animations, &motion);
        assert_eq!(fsm.current_frame(&animations).as_str(), "300");
    }

    #[test]
    fn reference_table_lists_all_frames() {
        let animations = AnimationSet::reference();
        assert_eq!(animations.idle().as_str(), "300");
        let walking: usize = CardinalDirection::ALL
            .iter()
            .filter_map(|direction| animations.cycle(*direction))
            .map(<[FrameId]>::len)
            .sum();
        assert_eq!(walking, 8);
    }
}
