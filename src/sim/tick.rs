//! Ball simulation tick
//!
//! Advances the ball by one frame: sink animation, friction, integration,
//! off-course reset, hole capture and obstacle bounces. Only one collision
//! is resolved per tick, first obstacle in iteration order wins.

use glam::Vec2;

use super::collision::{Rect, reflect};
use super::phase::Trigger;
use super::state::{Ball, BallState, GameEvent, World};
use crate::consts::*;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball moved (or sat still) without touching anything
    Moved,
    /// Ball left the playfield and was put back at the fallback spot
    Reset,
    /// Ball reflected off the obstacle at this index
    Bounced(usize),
    /// Ball entered the hole this tick
    Captured,
    /// Sink animation or settle pause in progress
    Sinking,
    /// Round finished; phase is now Completed
    Completed,
}

/// Advance the world by one tick. Call only while the phase simulates.
pub fn tick(world: &mut World) -> TickOutcome {
    if world.ball.is_captured() {
        return advance_capture(world);
    }

    if !world.drag.active {
        apply_friction(&mut world.ball.vel);
    }

    let mut outcome = TickOutcome::Moved;
    if integrate(&mut world.ball) {
        log::debug!("Ball left the course, resetting");
        world.push_event(GameEvent::BallReset);
        outcome = TickOutcome::Reset;
    }

    let ball = &world.ball;
    let tentative = ball.rect.at(
        (ball.rect.x as f32 + ball.vel.x) as i32,
        (ball.rect.y as f32 + ball.vel.y) as i32,
    );

    if tentative.intersects(&world.hole) {
        capture(world);
        return TickOutcome::Captured;
    }

    if let Some(index) = world.obstacles.iter().position(|o| tentative.intersects(o)) {
        let obstacle = world.obstacles[index];
        let axis = reflect(&mut world.ball.rect, &mut world.ball.vel, &obstacle);
        world.score += 1;
        world.push_event(GameEvent::Bounce { obstacle: index });
        log::debug!("Bounce #{} off obstacle {} ({:?})", world.score, index, axis);
        return TickOutcome::Bounced(index);
    }

    world.ball.rect = tentative;
    outcome
}

/// Ticks that make up the post-capture pause at a given frame delay
pub fn settle_ticks_for(frame_delay_ms: u64) -> u32 {
    (SETTLE_PAUSE_MS / frame_delay_ms.max(1)).max(1) as u32
}

/// Damp velocity and snap tiny components to exactly zero
pub fn apply_friction(vel: &mut Vec2) {
    *vel *= FRICTION;
    if vel.x.abs() < REST_THRESHOLD {
        vel.x = 0.0;
    }
    if vel.y.abs() < REST_THRESHOLD {
        vel.y = 0.0;
    }
}

/// Move by the truncated velocity. Returns true if the ball had to be reset.
///
/// There is no bounce off the screen edges: leaving the playfield puts the
/// ball back at a fixed spot, at rest.
fn integrate(ball: &mut Ball) -> bool {
    ball.rect.x += ball.vel.x as i32;
    ball.rect.y += ball.vel.y as i32;

    if !on_course(&ball.rect) {
        *ball = Ball::at_rest(FALLBACK_X, FALLBACK_Y);
        return true;
    }
    false
}

fn on_course(rect: &Rect) -> bool {
    rect.x >= 0
        && rect.x <= SCREEN_WIDTH - BALL_SIZE
        && rect.y >= 0
        && rect.y <= SCREEN_HEIGHT - BALL_SIZE
}

/// Drop the ball into the hole; the animation starts next tick
fn capture(world: &mut World) {
    let hole = world.hole;
    let ball = &mut world.ball;
    ball.rect = ball.rect.at(hole.x + hole.w / 4, hole.y + hole.h / 4);
    ball.vel = Vec2::ZERO;
    ball.state = BallState::Sinking { progress: 0.0 };
    world.drag.active = false;
    world.aim = None;
    world.push_event(GameEvent::BallCaptured);
    log::debug!("Ball in the hole after {} bounces", world.score);
}

/// Shrink while sinking, then hold for the settle pause, then complete
fn advance_capture(world: &mut World) -> TickOutcome {
    match world.ball.state {
        BallState::Sinking { progress } => {
            let progress = progress + SINK_STEP;
            let ball = &mut world.ball;
            if ball.rect.w >= SINK_END_SIZE {
                let size = ((BALL_SIZE as f32 * (SINK_BASE_SCALE - progress)) as i32).max(0);
                ball.rect.w = size;
                ball.rect.h = size;
                ball.state = BallState::Sinking { progress };
            } else {
                ball.state = BallState::Settling {
                    ticks_left: world.settle_ticks.max(1),
                };
            }
            TickOutcome::Sinking
        }
        BallState::Settling { ticks_left } if ticks_left > 1 => {
            world.ball.state = BallState::Settling {
                ticks_left: ticks_left - 1,
            };
            TickOutcome::Sinking
        }
        BallState::Settling { .. } => {
            world.ball.state = BallState::Rolling;
            world.rounds_completed += 1;
            world.push_event(GameEvent::RoundCompleted);
            world.transition(Trigger::BallSunk);
            log::info!("Round {} completed", world.rounds_completed);
            TickOutcome::Completed
        }
        BallState::Rolling => TickOutcome::Moved,
    }
}
