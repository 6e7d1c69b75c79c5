//! Collision checking of segments and paths against obstacle footprints.
//!
//! The same checker serves two purposes with different clearances:
//!
//! - graph pruning: [`CollisionChecker::for_hitbox`] buffers every segment by
//!   the robot half-width, which is equivalent to testing against the
//!   inflated (avoidance) region of each obstacle
//! - runtime re-validation: [`CollisionChecker::footprint_only`] tests the
//!   remaining path against the bare footprints
//!
//! Results never depend on obstacle order.

use crate::core::{Point2D, Segment2D};
use crate::obstacle::{Hitbox, Obstacle};
use crate::trajectory::PathStep;

/// Segment/path vs. obstacle-set intersection test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionChecker {
    clearance: f32,
}

impl CollisionChecker {
    /// Checker with an explicit clearance around each segment.
    pub fn new(clearance: f32) -> Self {
        Self {
            clearance: clearance.max(0.0),
        }
    }

    /// Plain intersection with footprint polygons.
    pub fn footprint_only() -> Self {
        Self::new(0.0)
    }

    /// Segments buffered by the robot half-width.
    pub fn for_hitbox(hitbox: &Hitbox) -> Self {
        Self::new(hitbox.half_width())
    }

    /// Clearance applied around tested segments.
    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    /// True if the straight segment `from -> to` collides with any obstacle.
    pub fn segment_collides(&self, from: Point2D, to: Point2D, obstacles: &[Obstacle]) -> bool {
        let segment = Segment2D::new(from, to);
        obstacles
            .iter()
            .any(|obstacle| obstacle.footprint().is_within(&segment, self.clearance))
    }

    /// True if any consecutive pair of `points` collides.
    ///
    /// A single point is tested as a zero-length segment.
    pub fn polyline_collides(&self, points: &[Point2D], obstacles: &[Obstacle]) -> bool {
        if obstacles.is_empty() {
            return false;
        }
        match points {
            [] => false,
            [single] => self.segment_collides(*single, *single, obstacles),
            _ => points
                .windows(2)
                .any(|pair| self.segment_collides(pair[0], pair[1], obstacles)),
        }
    }

    /// True if the unconsumed part of `step` collides.
    pub fn step_collides(&self, step: &PathStep, obstacles: &[Obstacle]) -> bool {
        self.polyline_collides(step.remaining(), obstacles)
    }

    /// True if any step of `path` collides.
    pub fn path_collides<'a, I>(&self, path: I, obstacles: &[Obstacle]) -> bool
    where
        I: IntoIterator<Item = &'a PathStep>,
    {
        if obstacles.is_empty() {
            return false;
        }
        path.into_iter()
            .any(|step| self.step_collides(step, obstacles))
    }
}

impl Default for CollisionChecker {
    fn default() -> Self {
        Self::footprint_only()
    }
}
