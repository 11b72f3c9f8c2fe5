//! World state and entity types
//!
//! One `World` value holds everything a round needs. It is owned by the
//! game controller and handed by reference to the interpreter, the
//! simulator and the presenter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::phase::{GamePhase, Trigger};
use crate::consts::*;

/// Number of obstacles on the course
pub const OBSTACLE_COUNT: usize = 12;

/// Reference obstacle layout. Sizes stay fixed; positions are reshuffled
/// between rounds.
pub const REFERENCE_OBSTACLES: [Rect; OBSTACLE_COUNT] = [
    Rect::new(300, 200, 70, 40),
    Rect::new(350, 100, 80, 45),
    Rect::new(600, 450, 100, 60),
    Rect::new(600, 200, 50, 50),
    Rect::new(250, 250, 55, 55),
    Rect::new(300, 400, 50, 50),
    Rect::new(800, 310, 95, 95),
    Rect::new(750, 100, 95, 95),
    Rect::new(480, 410, 50, 50),
    Rect::new(150, 180, 80, 45),
    Rect::new(480, 160, 40, 40),
    Rect::new(100, 400, 100, 100),
];

/// Initial hole position
pub const REFERENCE_HOLE: Rect = Rect::square(90, 280, HOLE_SIZE);

/// Ball lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Free to roll and be launched
    Rolling,
    /// Captured by the hole, shrinking (progress 0..1)
    Sinking { progress: f32 },
    /// Shrink finished, holding still before the round completes
    Settling { ticks_left: u32 },
}

/// The golf ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    pub state: BallState,
}

impl Ball {
    /// Ball at rest in the middle of the screen
    pub fn centered() -> Self {
        Self::at_rest(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2)
    }

    pub fn at_rest(x: i32, y: i32) -> Self {
        Self {
            rect: Rect::square(x, y, BALL_SIZE),
            vel: Vec2::ZERO,
            state: BallState::Rolling,
        }
    }

    /// Velocity is exactly zero on both axes
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.vel.x == 0.0 && self.vel.y == 0.0
    }

    /// Captured by the hole (sinking or settling)
    #[inline]
    pub fn is_captured(&self) -> bool {
        !matches!(self.state, BallState::Rolling)
    }

    /// Sink animation progress, only meaningful while captured
    pub fn sink_progress(&self) -> Option<f32> {
        match self.state {
            BallState::Sinking { progress } => Some(progress),
            BallState::Settling { .. } => Some(1.0),
            BallState::Rolling => None,
        }
    }
}

/// Aim arrow shown while the player holds the pointer down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub rect: Rect,
    /// Degrees, already rotated so 0 points the arrow sprite "up"
    pub angle: f32,
}

/// Drag gesture bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drag {
    /// Pointer is held down; friction is suspended
    pub active: bool,
    /// Clock reading when the press started (ms)
    pub started_ms: u64,
}

/// Side effects requested by the simulation, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball was hit by the player
    BallLaunched,
    /// Ball hit an obstacle (index into the obstacle set)
    Bounce { obstacle: usize },
    /// Ball left the playfield and was put back
    BallReset,
    /// Ball dropped into the hole
    BallCaptured,
    /// Capture animation finished; completed screen is up
    RoundCompleted,
}

/// Complete world state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub phase: GamePhase,
    pub ball: Ball,
    pub obstacles: [Rect; OBSTACLE_COUNT],
    pub hole: Rect,
    /// Visible aim arrow, if dragging
    pub aim: Option<Aim>,
    pub drag: Drag,
    /// Bounce count for the current round
    pub score: u32,
    /// Rounds completed this session
    pub rounds_completed: u32,
    /// Length of the post-capture pause in ticks
    pub settle_ticks: u32,
    /// Pending side effects
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Fresh world on the start screen with the reference layout
    pub fn new() -> Self {
        Self {
            phase: GamePhase::StartScreen,
            ball: Ball::centered(),
            obstacles: REFERENCE_OBSTACLES,
            hole: REFERENCE_HOLE,
            aim: None,
            drag: Drag::default(),
            score: 0,
            rounds_completed: 0,
            settle_ticks: SETTLE_TICKS,
            events: Vec::new(),
        }
    }

    /// Fire a state machine trigger. Returns whether the phase changed.
    ///
    /// This is the only place `phase` is written.
    pub fn transition(&mut self, trigger: Trigger) -> bool {
        match self.phase.on(trigger) {
            Some(next) => {
                log::debug!("Phase {:?} --{:?}--> {:?}", self.phase, trigger, next);
                self.phase = next;
                true
            }
            None => {
                log::debug!("Ignored {:?} in phase {:?}", trigger, self.phase);
                false
            }
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every placed rectangle: obstacles, then ball, then hole
    pub fn placed_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles
            .iter()
            .copied()
            .chain([self.ball.rect, self.hole])
    }
}
