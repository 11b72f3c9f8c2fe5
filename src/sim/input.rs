//! Input interpretation
//!
//! Raw pointer/keyboard/window events become `Intent`s depending on the
//! current phase. Interpretation is pure: it reads the world and the clock
//! and never mutates anything. `Game::apply` carries the intents out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::phase::GamePhase;
use super::state::{Aim, World};
use crate::consts::*;

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Return,
    Space,
    /// Any other key (platform key code)
    Other(u32),
}

/// Platform-neutral input event, pointer in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    KeyDown(Key),
    KeyUp(Key),
    /// The window's close button
    WindowClosed,
}

/// What the player wants to happen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Leave the start screen
    StartGame,
    /// Show or move the aim arrow; `started_ms` is the press time
    Aim { started_ms: u64, aim: Aim },
    /// Release: hit the ball with this velocity
    Launch { velocity: Vec2 },
    /// Next round from the completed screen
    Restart,
    /// Graceful shutdown after the current frame
    Quit,
    /// Stop right now
    Terminate,
}

/// Unit vector from the ball center toward the pointer (zero if on center)
pub fn aim_direction(ball: &Rect, pointer: Vec2) -> Vec2 {
    (pointer - ball.center_vec()).normalize_or_zero()
}

/// Arrow placement and rotation for a given aim direction.
///
/// The arrow sits behind the ball, opposite the pointer, because the ball
/// travels away from where the player pulls.
pub fn aim_indicator(ball: &Rect, direction: Vec2) -> Aim {
    let angle = direction.y.atan2(direction.x).to_degrees() - 90.0;
    let distance = BALL_SIZE as f32 * ARROW_DISTANCE_FACTOR;
    let center = ball.center_vec();
    let half = (ARROW_SIZE / 2) as f32;
    Aim {
        rect: Rect::square(
            (center.x - distance * direction.x - half) as i32,
            (center.y - distance * direction.y - half) as i32,
            ARROW_SIZE,
        ),
        angle,
    }
}

/// Launch velocity for a press held `held_ms` toward `direction`.
///
/// Power grows linearly with hold time up to `MAX_PRESS_MS`.
pub fn launch_velocity(direction: Vec2, held_ms: u64) -> Vec2 {
    let held = held_ms.min(MAX_PRESS_MS) as f32;
    -direction * (held / POWER_DIVISOR)
}

/// Translate one event into an intent for the current phase
pub fn interpret(world: &World, event: &InputEvent, now_ms: u64) -> Option<Intent> {
    match *event {
        InputEvent::WindowClosed => return Some(Intent::Quit),
        InputEvent::KeyDown(Key::Escape) => return Some(Intent::Terminate),
        _ => {}
    }

    match world.phase {
        GamePhase::StartScreen => match event {
            InputEvent::KeyDown(_) => Some(Intent::StartGame),
            _ => None,
        },
        GamePhase::Running => interpret_running(world, event, now_ms),
        GamePhase::Completed => match event {
            InputEvent::KeyDown(Key::Return) => Some(Intent::Restart),
            _ => None,
        },
        GamePhase::Exit => None,
    }
}

fn interpret_running(world: &World, event: &InputEvent, now_ms: u64) -> Option<Intent> {
    let ball = &world.ball;
    // Aiming only makes sense with the ball at rest on the green
    if !ball.is_stopped() || ball.is_captured() {
        return None;
    }

    match *event {
        InputEvent::PointerDown { x, y } => {
            let direction = aim_direction(&ball.rect, Vec2::new(x, y));
            Some(Intent::Aim {
                started_ms: now_ms,
                aim: aim_indicator(&ball.rect, direction),
            })
        }
        InputEvent::PointerMove { x, y } if world.drag.active => {
            let direction = aim_direction(&ball.rect, Vec2::new(x, y));
            Some(Intent::Aim {
                started_ms: world.drag.started_ms,
                aim: aim_indicator(&ball.rect, direction),
            })
        }
        InputEvent::PointerUp { x, y } if world.drag.active => {
            let held = now_ms.saturating_sub(world.drag.started_ms);
            let direction = aim_direction(&ball.rect, Vec2::new(x, y));
            Some(Intent::Launch {
                velocity: launch_velocity(direction, held),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BallState, Drag};

    fn running_world() -> World {
        let mut world = World::new();
        world.phase = GamePhase::Running;
        world
    }

    fn dragging_world(started_ms: u64) -> World {
        let mut world = running_world();
        world.drag = Drag {
            active: true,
            started_ms,
        };
        world
    }

    #[test]
    fn test_any_key_starts_game() {
        let world = World::new();
        assert_eq!(
            interpret(&world, &InputEvent::KeyDown(Key::Space), 0),
            Some(Intent::StartGame)
        );
        assert_eq!(
            interpret(&world, &InputEvent::KeyDown(Key::Other(65)), 0),
            Some(Intent::StartGame)
        );
        assert_eq!(interpret(&world, &InputEvent::PointerDown { x: 1.0, y: 1.0 }, 0), None);
        assert_eq!(interpret(&world, &InputEvent::KeyUp(Key::Space), 0), None);
    }

    #[test]
    fn test_window_close_and_escape_in_every_phase() {
        for phase in [GamePhase::StartScreen, GamePhase::Running, GamePhase::Completed] {
            let mut world = World::new();
            world.phase = phase;
            assert_eq!(interpret(&world, &InputEvent::WindowClosed, 0), Some(Intent::Quit));
            assert_eq!(
                interpret(&world, &InputEvent::KeyDown(Key::Escape), 0),
                Some(Intent::Terminate)
            );
        }
    }

    #[test]
    fn test_press_aims_away_from_pointer() {
        let world = running_world();
        // Ball center is (488, 278); pointer straight to the right
        let intent = interpret(&world, &InputEvent::PointerDown { x: 588.0, y: 278.0 }, 1234);
        let Some(Intent::Aim { started_ms, aim }) = intent else {
            panic!("expected aim intent, got {intent:?}");
        };
        assert_eq!(started_ms, 1234);
        assert!((aim.angle - (-90.0)).abs() < 1e-4);
        // 1.7 * 16 = 27.2 behind the center, minus half the arrow
        assert_eq!(aim.rect, Rect::square((488.0 - 27.2 - 25.0) as i32, 278 - 25, 50));
    }

    #[test]
    fn test_press_ignored_while_ball_moving() {
        let mut world = running_world();
        world.ball.vel = Vec2::new(0.5, 0.0);
        assert_eq!(interpret(&world, &InputEvent::PointerDown { x: 0.0, y: 0.0 }, 0), None);
        world.drag.active = true;
        assert_eq!(interpret(&world, &InputEvent::PointerUp { x: 0.0, y: 0.0 }, 0), None);
    }

    #[test]
    fn test_press_ignored_while_ball_captured() {
        let mut world = running_world();
        world.ball.state = BallState::Sinking { progress: 0.1 };
        assert_eq!(interpret(&world, &InputEvent::PointerDown { x: 0.0, y: 0.0 }, 0), None);
    }

    #[test]
    fn test_release_launches_opposite_to_pointer() {
        let world = dragging_world(1000);
        // Pointer to the left of the ball, held 200 ms
        let intent = interpret(&world, &InputEvent::PointerUp { x: 388.0, y: 278.0 }, 1200);
        assert_eq!(
            intent,
            Some(Intent::Launch {
                velocity: Vec2::new(20.0, 0.0)
            })
        );
    }

    #[test]
    fn test_release_power_is_capped() {
        let world = dragging_world(0);
        let intent = interpret(&world, &InputEvent::PointerUp { x: 488.0, y: 378.0 }, 5000);
        assert_eq!(
            intent,
            Some(Intent::Launch {
                velocity: Vec2::new(0.0, -40.0)
            })
        );
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let world = running_world();
        assert_eq!(interpret(&world, &InputEvent::PointerUp { x: 0.0, y: 0.0 }, 100), None);
    }

    #[test]
    fn test_release_on_ball_center_launches_nothing() {
        let world = dragging_world(0);
        let intent = interpret(&world, &InputEvent::PointerUp { x: 488.0, y: 278.0 }, 300);
        assert_eq!(intent, Some(Intent::Launch { velocity: Vec2::ZERO }));
    }

    #[test]
    fn test_move_while_dragging_reaims() {
        let world = dragging_world(50);
        let intent = interpret(&world, &InputEvent::PointerMove { x: 488.0, y: 378.0 }, 90);
        let Some(Intent::Aim { started_ms, aim }) = intent else {
            panic!("expected aim intent, got {intent:?}");
        };
        assert_eq!(started_ms, 50);
        assert!(aim.angle.abs() < 1e-4);

        let idle = running_world();
        assert_eq!(interpret(&idle, &InputEvent::PointerMove { x: 0.0, y: 0.0 }, 0), None);
    }

    #[test]
    fn test_return_restarts_only_when_completed() {
        let mut world = running_world();
        assert_eq!(interpret(&world, &InputEvent::KeyDown(Key::Return), 0), None);
        world.phase = GamePhase::Completed;
        assert_eq!(
            interpret(&world, &InputEvent::KeyDown(Key::Return), 0),
            Some(Intent::Restart)
        );
        assert_eq!(interpret(&world, &InputEvent::KeyDown(Key::Space), 0), None);
    }

    #[test]
    fn test_launch_velocity_scales_with_hold() {
        let dir = Vec2::new(0.6, 0.8);
        assert_eq!(launch_velocity(dir, 0), Vec2::ZERO);
        let v = launch_velocity(dir, 100);
        assert!((v - Vec2::new(-6.0, -8.0)).length() < 1e-5);
        assert_eq!(launch_velocity(dir, 400), launch_velocity(dir, 4000));
    }
}
