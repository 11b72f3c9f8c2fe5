//! Self-playing event source for headless runs
//!
//! Starts the game, putts whenever the ball is at rest, restarts after each
//! completed round and closes the window once enough rounds (or frames) have
//! gone by.
//!
//! Shots are planned by running the simulation ahead on a copy of the world.
//! While the pointer is held, each frame tries a full circle of aim
//! directions at the power reached so far and lets go as soon as one of them
//! sinks the ball. At full power with nothing sinking, it takes the direction
//! that leaves the ball closest to the hole, preferring spots it has not
//! putted from yet this round.

use std::f32::consts::TAU;

use glam::Vec2;

use super::EventSource;
use crate::consts::MAX_PRESS_MS;
use crate::settings::AutoplaySettings;
use crate::sim::collision::Rect;
use crate::sim::input::{aim_direction, launch_velocity};
use crate::sim::{Drag, GamePhase, InputEvent, Key, TickOutcome, World, tick};

/// Pointer distance from the ball center (px)
const PULL_DISTANCE: f32 = 60.0;
/// Aim directions tried per frame
const AIM_STEPS: u32 = 360;
/// Give up following a shot after this many ticks
const MAX_PREDICT_TICKS: u32 = 600;
/// Added to the score of a rest spot already putted from
const REVISIT_PENALTY: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Prediction {
    Sinks,
    RestsAt(Rect),
}

/// Play a launch out on a copy of the world
fn predict(world: &World, velocity: Vec2) -> Prediction {
    let mut sim = world.clone();
    sim.events.clear();
    sim.drag = Drag::default();
    sim.aim = None;
    sim.ball.vel = velocity;

    for _ in 0..MAX_PREDICT_TICKS {
        if tick(&mut sim) == TickOutcome::Captured {
            return Prediction::Sinks;
        }
        if sim.ball.is_stopped() {
            break;
        }
    }
    Prediction::RestsAt(sim.ball.rect)
}

/// Scripted player
#[derive(Debug)]
pub struct Autopilot {
    rounds: u32,
    max_frames: u64,
    frames: u64,
    closed: bool,
    shots: u32,
    /// Ball positions putted from during the current round
    tried: Vec<(i32, i32)>,
}

impl Autopilot {
    pub fn new(rounds: u32, max_frames: u64) -> Self {
        Self {
            rounds,
            max_frames,
            frames: 0,
            closed: false,
            shots: 0,
            tried: Vec::new(),
        }
    }

    pub fn from_settings(settings: &AutoplaySettings) -> Self {
        Self::new(settings.rounds, settings.max_frames)
    }

    /// Putts taken so far
    pub fn shots(&self) -> u32 {
        self.shots
    }

    fn close(&mut self) -> Vec<InputEvent> {
        if self.closed {
            return Vec::new();
        }
        self.closed = true;
        vec![InputEvent::WindowClosed]
    }

    fn putt(&mut self, world: &World, now_ms: u64) -> Vec<InputEvent> {
        let ball = &world.ball;

        if !world.drag.active {
            if !ball.is_stopped() || ball.is_captured() {
                return Vec::new();
            }
            let spot = (ball.rect.x, ball.rect.y);
            if !self.tried.contains(&spot) {
                self.tried.push(spot);
            }
            let center = ball.rect.center_vec();
            return vec![InputEvent::PointerDown {
                x: center.x + PULL_DISTANCE,
                y: center.y,
            }];
        }

        let held = now_ms.saturating_sub(world.drag.started_ms);
        match self.plan_release(world, held) {
            Some(pointer) => {
                self.shots += 1;
                vec![InputEvent::PointerUp {
                    x: pointer.x,
                    y: pointer.y,
                }]
            }
            None => Vec::new(),
        }
    }

    /// Pointer position to release at with the power `held` gives, if now is
    /// the time to let go
    fn plan_release(&self, world: &World, held: u64) -> Option<Vec2> {
        let full_power = held >= MAX_PRESS_MS;
        let ball = &world.ball.rect;
        let center = ball.center_vec();
        let hole = world.hole.center_vec();
        let mut fallback: Option<(f32, Vec2)> = None;

        for step in 0..AIM_STEPS {
            let angle = step as f32 * TAU / AIM_STEPS as f32;
            let pointer = center + Vec2::from_angle(angle) * PULL_DISTANCE;
            let velocity = launch_velocity(aim_direction(ball, pointer), held);

            match predict(world, velocity) {
                Prediction::Sinks => {
                    log::debug!("Autopilot found a sinking putt: {}ms at {}deg", held, step);
                    return Some(pointer);
                }
                Prediction::RestsAt(rest) if full_power => {
                    let mut score = rest.center_vec().distance(hole);
                    if self.tried.contains(&(rest.x, rest.y)) {
                        score += REVISIT_PENALTY;
                    }
                    if fallback.is_none_or(|(best, _)| score < best) {
                        fallback = Some((score, pointer));
                    }
                }
                Prediction::RestsAt(_) => {}
            }
        }

        if fallback.is_some() {
            log::debug!("Autopilot laying up at full power");
        }
        fallback.map(|(_, pointer)| pointer)
    }
}

impl EventSource for Autopilot {
    fn poll(&mut self, world: &World, now_ms: u64) -> Vec<InputEvent> {
        self.frames += 1;
        if self.frames >= self.max_frames {
            log::info!("Autopilot frame budget used up");
            return self.close();
        }
        if world.rounds_completed >= self.rounds {
            return self.close();
        }

        match world.phase {
            GamePhase::StartScreen => vec![InputEvent::KeyDown(Key::Space)],
            GamePhase::Running => self.putt(world, now_ms),
            GamePhase::Completed => {
                self.tried.clear();
                vec![InputEvent::KeyDown(Key::Return)]
            }
            GamePhase::Exit => Vec::new(),
        }
    }
}
