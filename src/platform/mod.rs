//! Platform abstraction layer
//!
//! Handles backend differences for:
//! - Time (real or virtual clock)
//! - Input events (window backend, scripts, autopilot)
//! - The frame loop tying game, audio and presenter together

pub mod autopilot;

pub use autopilot::Autopilot;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::assets::ResourceProvider;
use crate::audio::{AudioManager, AudioSink};
use crate::game::Game;
use crate::renderer::{DrawSurface, Presenter, compose};
use crate::sim::{GameEvent, InputEvent, Intent, World};

/// Millisecond clock driving press timing and frame pacing
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock measured from creation
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { start: Instant::now() }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock where sleeping just advances the reading
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration.as_millis() as u64);
    }
}

/// Source of pending input, polled once per frame
pub trait EventSource {
    fn poll(&mut self, world: &World, now_ms: u64) -> Vec<InputEvent>;
}

/// Replays events at fixed frame numbers
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    script: VecDeque<(u64, InputEvent)>,
    frame: u64,
}

impl ScriptedEvents {
    /// `script` pairs a frame number with the event delivered on that frame
    pub fn new(mut script: Vec<(u64, InputEvent)>) -> Self {
        script.sort_by_key(|(frame, _)| *frame);
        Self {
            script: script.into(),
            frame: 0,
        }
    }

    /// Events not yet delivered
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, _world: &World, _now_ms: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some((frame, _)) = self.script.front() {
            if *frame > self.frame {
                break;
            }
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        self.frame += 1;
        events
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Window closed; the last frame was finished
    Quit,
    /// Escape; stopped mid-frame
    Terminated,
    /// `max_frames` reached
    FrameLimit,
}

/// Loop statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub exit: ExitReason,
    pub frames: u64,
    pub rounds: u32,
    /// Bounces over the whole session
    pub bounces: u32,
}

/// Everything the loop talks to besides the game itself
pub struct Runtime<'a, S: AudioSink> {
    pub events: &'a mut dyn EventSource,
    pub clock: &'a mut dyn Clock,
    pub surface: &'a mut dyn DrawSurface,
    pub audio: &'a mut AudioManager<S>,
    pub resources: &'a dyn ResourceProvider,
    pub frame_delay: Duration,
    /// Stop after this many frames (`None` = until quit)
    pub max_frames: Option<u64>,
}

/// Run frames until quit, escape or the frame limit.
///
/// Per frame: poll and apply input, simulate one tick if running, hand
/// events to audio, compose and present, then sleep the fixed delay.
pub fn run<S: AudioSink>(game: &mut Game, mut rt: Runtime<'_, S>) -> RunSummary {
    let mut presenter = Presenter::new();
    let mut frames = 0u64;
    let mut bounces = 0u32;

    let exit = loop {
        if rt.max_frames.is_some_and(|max| frames >= max) {
            log::info!("Frame limit reached");
            break ExitReason::FrameLimit;
        }

        let now = rt.clock.now_ms();
        let mut terminated = false;
        for event in rt.events.poll(&game.world, now) {
            if game.handle_event(&event, now) == Some(Intent::Terminate) {
                terminated = true;
                break;
            }
        }
        if terminated {
            break ExitReason::Terminated;
        }

        game.update();

        let events = game.world.drain_events();
        bounces += events
            .iter()
            .filter(|e| matches!(e, GameEvent::Bounce { .. }))
            .count() as u32;
        rt.audio.handle_events(&events, rt.resources);

        presenter.present(&compose(&game.world, rt.resources), rt.surface);
        frames += 1;

        if game.world.phase.is_terminal() {
            break ExitReason::Quit;
        }

        rt.clock.sleep(rt.frame_delay);
    };

    RunSummary {
        exit,
        frames,
        rounds: game.world.rounds_completed,
        bounces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetManifest, MemoryLoader, ResourceManager};
    use crate::audio::RecordingSink;
    use crate::renderer::{RecordingSurface, SurfaceCall};
    use crate::sim::{GamePhase, Key};

    struct Harness {
        resources: ResourceManager<MemoryLoader>,
        clock: VirtualClock,
        surface: RecordingSurface,
        audio: AudioManager<RecordingSink>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                resources: ResourceManager::acquire(MemoryLoader::new(), &AssetManifest::default()).unwrap(),
                clock: VirtualClock::new(),
                surface: RecordingSurface::new(),
                audio: AudioManager::new(RecordingSink::default()),
            }
        }

        fn run(&mut self, game: &mut Game, events: &mut dyn EventSource, max_frames: u64) -> RunSummary {
            run(
                game,
                Runtime {
                    events,
                    clock: &mut self.clock,
                    surface: &mut self.surface,
                    audio: &mut self.audio,
                    resources: &self.resources,
                    frame_delay: Duration::from_millis(16),
                    max_frames: Some(max_frames),
                },
            )
        }
    }

    #[test]
    fn test_virtual_clock_advances_on_sleep() {
        let mut clock = VirtualClock::new();
        clock.sleep(Duration::from_millis(16));
        clock.sleep(Duration::from_millis(16));
        assert_eq!(clock.now_ms(), 32);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let mut clock = SystemClock::new();
        let before = clock.now_ms();
        clock.sleep(Duration::from_millis(2));
        assert!(clock.now_ms() >= before + 2);
    }

    #[test]
    fn test_scripted_events_by_frame() {
        let world = World::new();
        let mut script = ScriptedEvents::new(vec![
            (2, InputEvent::WindowClosed),
            (0, InputEvent::KeyDown(Key::Space)),
        ]);
        assert_eq!(script.poll(&world, 0), vec![InputEvent::KeyDown(Key::Space)]);
        assert!(script.poll(&world, 0).is_empty());
        assert_eq!(script.poll(&world, 0), vec![InputEvent::WindowClosed]);
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn test_frame_limit() {
        let mut h = Harness::new();
        let mut game = Game::new(1);
        let summary = h.run(&mut game, &mut ScriptedEvents::default(), 5);
        assert_eq!(summary.exit, ExitReason::FrameLimit);
        assert_eq!(summary.frames, 5);
        assert_eq!(h.surface.frames_presented, 5);
        assert_eq!(h.clock.now_ms(), 80);
    }

    #[test]
    fn test_quit_finishes_the_frame() {
        let mut h = Harness::new();
        let mut game = Game::new(1);
        let mut events = ScriptedEvents::new(vec![(0, InputEvent::KeyDown(Key::Space)), (3, InputEvent::WindowClosed)]);
        let summary = h.run(&mut game, &mut events, 100);
        assert_eq!(summary.exit, ExitReason::Quit);
        assert_eq!(summary.frames, 4);
        assert_eq!(h.surface.frames_presented, 4);
        assert_eq!(game.world.phase, GamePhase::Exit);
        // Exit frame is blank
        assert_eq!(h.surface.last_frame, vec![SurfaceCall::Clear, SurfaceCall::Present]);
    }

    #[test]
    fn test_escape_stops_immediately() {
        let mut h = Harness::new();
        let mut game = Game::new(1);
        let mut events = ScriptedEvents::new(vec![(2, InputEvent::KeyDown(Key::Escape))]);
        let summary = h.run(&mut game, &mut events, 100);
        assert_eq!(summary.exit, ExitReason::Terminated);
        assert_eq!(summary.frames, 2);
        assert_eq!(h.surface.frames_presented, 2);
    }

    #[test]
    fn test_launch_plays_sound() {
        let mut h = Harness::new();
        let mut game = Game::new(1);
        let center = game.world.ball.rect.center_vec();
        let pointer = InputEvent::PointerDown {
            x: center.x,
            y: center.y + 40.0,
        };
        let release = InputEvent::PointerUp {
            x: center.x,
            y: center.y + 40.0,
        };
        let mut events = ScriptedEvents::new(vec![(0, InputEvent::KeyDown(Key::Space)), (1, pointer), (5, release)]);
        h.run(&mut game, &mut events, 7);

        let launch = h.resources.sound("launch").unwrap();
        assert_eq!(h.audio.sink().played.len(), 1);
        assert_eq!(h.audio.sink().played[0].0, launch);
        // Held for 4 frames of 16ms, pulled downward: ball goes up
        assert!(game.world.ball.vel.y < 0.0);
    }
}
