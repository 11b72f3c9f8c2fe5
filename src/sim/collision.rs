//! Axis-aligned rectangle geometry and collision response
//!
//! Everything on the playfield is a pixel rectangle. Collision response is a
//! single-axis reflection: the ball is pushed out along one axis and the
//! velocity component on that axis flips. There is no diagonal bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer pixel rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rectangle of side `size` at (x, y)
    pub const fn square(x: i32, y: i32, size: i32) -> Self {
        Self::new(x, y, size, size)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Integer center, rounding toward the top-left like pixel math does
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Same as `center` but as a float vector (for direction math)
    #[inline]
    pub fn center_vec(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32, cy as f32)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Positive-area overlap test.
    ///
    /// Intervals are half-open, so rectangles that only share an edge or a
    /// corner do not intersect, and empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Copy moved to (x, y), keeping the size
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Rect {
        Rect { x, y, ..*self }
    }
}

/// Axis along which a collision was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Push `ball` out of `obstacle` and flip one velocity component.
///
/// The axis is chosen by the larger center delta; vertical wins ties.
/// The ball ends up flush against the obstacle side it came from.
pub fn reflect(ball: &mut Rect, vel: &mut Vec2, obstacle: &Rect) -> Axis {
    let (bx, by) = ball.center();
    let (ox, oy) = obstacle.center();
    let dx = bx - ox;
    let dy = by - oy;

    if dx.abs() > dy.abs() {
        ball.x = if dx > 0 {
            obstacle.right()
        } else {
            obstacle.x - ball.w
        };
        vel.x = -vel.x;
        Axis::Horizontal
    } else {
        ball.y = if dy > 0 {
            obstacle.bottom()
        } else {
            obstacle.y - ball.h
        };
        vel.y = -vel.y;
        Axis::Vertical
    }
}
