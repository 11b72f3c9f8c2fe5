//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed constants
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (obstacle index order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod input;
pub mod layout;
pub mod phase;
pub mod state;
pub mod tick;

pub use collision::{Axis, Rect, reflect};
pub use input::{InputEvent, Intent, Key, interpret};
pub use layout::{LayoutError, randomize};
pub use phase::{GamePhase, Trigger};
pub use state::{Aim, Ball, BallState, Drag, GameEvent, OBSTACLE_COUNT, World};
pub use tick::{TickOutcome, tick};
