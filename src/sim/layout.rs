//! Course layout randomization
//!
//! Rejection sampling: each entity draws a uniform position inside the
//! inset play area and redraws while it overlaps anything it must avoid.
//! Obstacles avoid each other, the ball avoids obstacles, the hole avoids
//! obstacles and the ball. Each obstacle is checked against the current
//! position of every other obstacle, so later placements always respect
//! earlier ones and the result is pairwise disjoint.

use rand::Rng;
use thiserror::Error;

use super::collision::Rect;
use crate::consts::*;

/// Redraws allowed per entity before giving up
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No free spot found for an entity within the attempt cap
    #[error("could not place {entity} after {attempts} attempts")]
    Exhausted { entity: &'static str, attempts: u32 },
}

/// Uniform top-left position inside the inset area
fn sample_position<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32) {
    (
        LAYOUT_INSET + rng.random_range(0..LAYOUT_SPAN_X),
        LAYOUT_INSET + rng.random_range(0..LAYOUT_SPAN_Y),
    )
}

/// Redraw `rect`'s position until `blocked` says it is clear
fn place<R, F>(rect: &mut Rect, entity: &'static str, rng: &mut R, blocked: F) -> Result<u32, LayoutError>
where
    R: Rng + ?Sized,
    F: Fn(&Rect) -> bool,
{
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let (x, y) = sample_position(rng);
        *rect = rect.at(x, y);
        if !blocked(rect) {
            return Ok(attempt);
        }
    }
    Err(LayoutError::Exhausted {
        entity,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Shuffle obstacles, ball and hole into a non-overlapping arrangement.
///
/// Sizes are preserved; only positions are written. On error the inputs
/// are left untouched so the caller can keep the previous layout.
pub fn randomize<R: Rng + ?Sized>(
    obstacles: &mut [Rect],
    ball: &mut Rect,
    hole: &mut Rect,
    rng: &mut R,
) -> Result<(), LayoutError> {
    let mut placed = obstacles.to_vec();
    let mut new_ball = *ball;
    let mut new_hole = *hole;
    let mut attempts = 0;

    for i in 0..placed.len() {
        let mut rect = placed[i];
        attempts += place(&mut rect, "obstacle", rng, |candidate| {
            placed
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && candidate.intersects(other))
        })?;
        placed[i] = rect;
    }

    attempts += place(&mut new_ball, "ball", rng, |candidate| {
        placed.iter().any(|o| candidate.intersects(o))
    })?;

    attempts += place(&mut new_hole, "hole", rng, |candidate| {
        placed.iter().any(|o| candidate.intersects(o)) || candidate.intersects(&new_ball)
    })?;

    obstacles.copy_from_slice(&placed);
    *ball = new_ball;
    *hole = new_hole;
    log::debug!("Layout randomized in {} draws", attempts);
    Ok(())
}

/// Place only the ball, clear of `obstacles` and `hole`.
///
/// Used when a full layout could not be generated and the previous course
/// is kept. On error `ball` is left untouched.
pub fn place_ball<R: Rng + ?Sized>(
    obstacles: &[Rect],
    ball: &mut Rect,
    hole: &Rect,
    rng: &mut R,
) -> Result<(), LayoutError> {
    let mut candidate = *ball;
    place(&mut candidate, "ball", rng, |c| {
        obstacles.iter().any(|o| c.intersects(o)) || c.intersects(hole)
    })?;
    *ball = candidate;
    Ok(())
}

/// True when no two of the given rectangles overlap
pub fn is_disjoint(rects: &[Rect]) -> bool {
    rects
        .iter()
        .enumerate()
        .all(|(i, a)| rects[i + 1..].iter().all(|b| !a.intersects(b)))
}
