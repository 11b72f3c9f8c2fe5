//! Golf Pixel - a 2D mini-golf arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, layout, input, ball physics, phases)
//! - `game`: Round controller that applies input intents to the world
//! - `renderer`: Frame presenter producing draw commands for a drawing surface
//! - `assets`: Named texture/font/sound lookup with scoped acquisition
//! - `audio`: Fire-and-forget sound effect triggers
//! - `platform`: Event source, clock and the main frame loop
//! - `settings`: Runtime configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GolfError;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window title
    pub const WINDOW_TITLE: &str = "Golf Pixel";

    /// Playfield dimensions (fixed, no DPI scaling)
    pub const SCREEN_WIDTH: i32 = 960;
    pub const SCREEN_HEIGHT: i32 = 540;

    /// Ball and hole sizes (square)
    pub const BALL_SIZE: i32 = 16;
    pub const HOLE_SIZE: i32 = 16;

    /// Velocity multiplier applied every tick while the ball rolls
    pub const FRICTION: f32 = 0.9;
    /// Velocity components below this snap to zero
    pub const REST_THRESHOLD: f32 = 0.1;

    /// Longest press that still adds launch power (ms)
    pub const MAX_PRESS_MS: u64 = 400;
    /// Launch speed = press duration / POWER_DIVISOR
    pub const POWER_DIVISOR: f32 = 10.0;

    /// Aim arrow sits this many ball sizes behind the ball center
    pub const ARROW_DISTANCE_FACTOR: f32 = 1.7;
    pub const ARROW_SIZE: i32 = 50;

    /// Sink animation: progress step per tick and starting scale
    pub const SINK_STEP: f32 = 0.05;
    pub const SINK_BASE_SCALE: f32 = 0.8;
    /// Sink animation ends once the ball is narrower than this
    pub const SINK_END_SIZE: i32 = 12;

    /// Nominal frame delay (ms), ~60 Hz
    pub const FRAME_DELAY_MS: u64 = 16;
    /// Pause after the sink animation before the round is completed (ms)
    pub const SETTLE_PAUSE_MS: u64 = 1000;
    /// The same pause expressed in ticks
    pub const SETTLE_TICKS: u32 = (SETTLE_PAUSE_MS / FRAME_DELAY_MS) as u32;

    /// Where the ball goes after leaving the playfield
    pub const FALLBACK_X: i32 = 3 * SCREEN_WIDTH / 4;
    pub const FALLBACK_Y: i32 = 3 * SCREEN_HEIGHT / 4;

    /// Layout randomizer: inset from the screen edge and sampling span
    pub const LAYOUT_INSET: i32 = 100;
    pub const LAYOUT_SPAN_X: i32 = 700;
    pub const LAYOUT_SPAN_Y: i32 = 300;

    /// Score text placement
    pub const SCORE_TEXT_X: i32 = 40;
    pub const SCORE_TEXT_Y: i32 = 30;
}
