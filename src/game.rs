//! Round controller
//!
//! `Game` owns the world and the layout RNG. Input events go through the
//! interpreter and come back as intents, which are applied here; phase
//! changes always go through the state machine table.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::layout::place_ball;
use crate::sim::tick::settle_ticks_for;
use crate::sim::{Ball, Drag, GameEvent, InputEvent, Intent, TickOutcome, Trigger, World, interpret, randomize, tick};

/// Game session: world plus the seeded RNG used for layouts
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    rng: Pcg32,
}

impl Game {
    /// New session on the start screen with the reference course
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Like `new`, with the post-capture pause sized for `frame_delay_ms`
    pub fn with_frame_delay(seed: u64, frame_delay_ms: u64) -> Self {
        let mut game = Self::new(seed);
        game.world.settle_ticks = settle_ticks_for(frame_delay_ms);
        game
    }

    /// Interpret one event and apply the resulting intent
    pub fn handle_event(&mut self, event: &InputEvent, now_ms: u64) -> Option<Intent> {
        let intent = interpret(&self.world, event, now_ms)?;
        self.apply(intent);
        Some(intent)
    }

    /// Carry out an intent
    pub fn apply(&mut self, intent: Intent) {
        let world = &mut self.world;
        match intent {
            Intent::StartGame => {
                if world.transition(Trigger::Start) {
                    log::info!("Round started");
                }
            }
            Intent::Aim { started_ms, aim } => {
                world.drag = Drag {
                    active: true,
                    started_ms,
                };
                world.aim = Some(aim);
            }
            Intent::Launch { velocity } => {
                world.ball.vel = velocity;
                world.drag.active = false;
                world.aim = None;
                world.push_event(GameEvent::BallLaunched);
                log::debug!("Launched at ({:.2}, {:.2})", velocity.x, velocity.y);
            }
            Intent::Restart => {
                if world.transition(Trigger::Restart) {
                    self.start_next_round();
                }
            }
            Intent::Quit => {
                world.transition(Trigger::Quit);
                log::info!("Quit requested");
            }
            Intent::Terminate => {
                world.transition(Trigger::Quit);
                log::info!("Terminate requested");
            }
        }
    }

    /// Fresh ball, new layout, zero score
    fn start_next_round(&mut self) {
        let world = &mut self.world;
        world.ball = Ball::centered();
        world.aim = None;
        world.drag = Drag::default();
        world.score = 0;

        if let Err(err) = randomize(&mut world.obstacles, &mut world.ball.rect, &mut world.hole, &mut self.rng) {
            log::error!("Keeping previous layout: {}", err);
            if let Err(err) = place_ball(&world.obstacles, &mut world.ball.rect, &world.hole, &mut self.rng) {
                log::error!("Ball stays at the center: {}", err);
            }
        }
        log::info!("Round {} started", world.rounds_completed + 1);
    }

    /// Run one simulation tick if the phase allows it
    pub fn update(&mut self) -> Option<TickOutcome> {
        if self.world.phase.simulates() {
            Some(tick(&mut self.world))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_SIZE;
    use crate::sim::layout::is_disjoint;
    use crate::sim::{BallState, GamePhase, Key, Rect};
    use glam::Vec2;

    fn running_game() -> Game {
        let mut game = Game::new(1);
        game.handle_event(&InputEvent::KeyDown(Key::Space), 0);
        assert_eq!(game.world.phase, GamePhase::Running);
        game
    }

    #[test]
    fn test_update_only_while_running() {
        let mut game = Game::new(5);
        assert_eq!(game.update(), None);
        game.handle_event(&InputEvent::KeyDown(Key::Other(1)), 0);
        assert!(game.update().is_some());
    }

    #[test]
    fn test_drag_gesture_launches_ball() {
        let mut game = running_game();
        let center = game.world.ball.rect.center_vec();

        game.handle_event(&InputEvent::PointerDown { x: center.x + 50.0, y: center.y }, 1000);
        assert!(game.world.drag.active);
        assert!(game.world.aim.is_some());

        // Holding still: no friction while dragging, ball stays put
        game.update();
        assert!(game.world.ball.is_stopped());

        game.handle_event(&InputEvent::PointerUp { x: center.x + 50.0, y: center.y }, 1300);
        assert!(!game.world.drag.active);
        assert!(game.world.aim.is_none());
        assert_eq!(game.world.ball.vel, Vec2::new(-30.0, 0.0));
        assert_eq!(game.world.drain_events(), vec![GameEvent::BallLaunched]);
    }

    #[test]
    fn test_restart_from_completed() {
        let mut game = running_game();
        game.world.score = 7;
        game.world.ball.rect = game.world.ball.rect.at(100, 100);
        game.world.ball.rect.w = 11;
        game.world.ball.rect.h = 11;
        game.world.ball.state = BallState::Settling { ticks_left: 1 };
        game.update();
        assert_eq!(game.world.phase, GamePhase::Completed);

        // Only Return restarts
        game.handle_event(&InputEvent::KeyDown(Key::Space), 0);
        assert_eq!(game.world.phase, GamePhase::Completed);
        game.handle_event(&InputEvent::KeyDown(Key::Return), 0);

        let world = &game.world;
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert!(world.ball.is_stopped());
        assert!(!world.ball.is_captured());
        assert_eq!((world.ball.rect.w, world.ball.rect.h), (BALL_SIZE, BALL_SIZE));
        let rects: Vec<_> = world.placed_rects().collect();
        assert!(is_disjoint(&rects));
    }

    #[test]
    fn test_frame_delay_sizes_settle_pause() {
        assert_eq!(Game::new(1).world.settle_ticks, crate::consts::SETTLE_TICKS);
        assert_eq!(Game::with_frame_delay(1, 5).world.settle_ticks, 200);
    }

    #[test]
    fn test_failed_layout_keeps_course_and_clears_ball() {
        let mut game = running_game();
        // Two obstacles too large to ever sit apart in the sampling area
        let big = Rect::new(240, 0, 710, 310);
        game.world.obstacles[0] = big;
        game.world.obstacles[1] = big;
        let obstacles = game.world.obstacles;
        let hole = game.world.hole;
        game.world.phase = GamePhase::Completed;

        game.apply(Intent::Restart);

        let world = &game.world;
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.obstacles, obstacles);
        assert_eq!(world.hole, hole);
        assert!(!world.obstacles.iter().any(|o| world.ball.rect.intersects(o)));
        assert!(!world.ball.rect.intersects(&world.hole));
        assert_eq!((world.ball.rect.w, world.ball.rect.h), (BALL_SIZE, BALL_SIZE));
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let play = |seed| {
            let mut game = Game::new(seed);
            game.world.phase = GamePhase::Completed;
            game.apply(Intent::Restart);
            game.world.obstacles
        };
        assert_eq!(play(11), play(11));
    }

    #[test]
    fn test_quit_and_terminate_exit() {
        let mut game = running_game();
        game.handle_event(&InputEvent::WindowClosed, 0);
        assert_eq!(game.world.phase, GamePhase::Exit);

        let mut game = Game::new(2);
        assert_eq!(
            game.handle_event(&InputEvent::KeyDown(Key::Escape), 0),
            Some(Intent::Terminate)
        );
        assert!(game.world.phase.is_terminal());
    }
}
