//! Straight line segment between two points.

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// Line segment from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment2D {
    /// Start point
    pub start: Point2D,
    /// End point
    pub end: Point2D,
}

impl Segment2D {
    /// Create a new segment.
    #[inline]
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Direction vector (end - start), not normalized.
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Segment length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// True if start and end coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().length() <= f32::EPSILON
    }

    /// Point at parameter t (0 = start, 1 = end).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2D {
        self.start.lerp(&self.end, t)
    }

    /// Parameter of the orthogonal projection of `point`, unclamped.
    ///
    /// Returns 0 for degenerate segments.
    #[inline]
    pub fn project_point(&self, point: Point2D) -> f32 {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        (point - self.start).dot(&d) / len_sq
    }

    /// Distance from `point` to the closest point on the segment.
    pub fn distance_to_point(&self, point: Point2D) -> f32 {
        let t = self.project_point(point).clamp(0.0, 1.0);
        point.distance(&self.point_at(t))
    }

    /// True if the two closed segments share at least one point.
    pub fn intersects(&self, other: &Segment2D) -> bool {
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }

        // Touching or collinear cases
        (o1 == 0.0 && on_segment(self, other.start))
            || (o2 == 0.0 && on_segment(self, other.end))
            || (o3 == 0.0 && on_segment(other, self.start))
            || (o4 == 0.0 && on_segment(other, self.end))
    }

    /// Minimum distance between two segments (0 if they intersect).
    pub fn distance_to_segment(&self, other: &Segment2D) -> f32 {
        if self.intersects(other) {
            return 0.0;
        }
        self.distance_to_point(other.start)
            .min(self.distance_to_point(other.end))
            .min(other.distance_to_point(self.start))
            .min(other.distance_to_point(self.end))
    }
}

/// Signed area of the triangle (a, b, c); positive when counter-clockwise.
#[inline]
fn orientation(a: Point2D, b: Point2D, c: Point2D) -> f32 {
    (b - a).cross(&(c - a))
}

/// Assumes `p` is collinear with `seg`.
#[inline]
fn on_segment(seg: &Segment2D, p: Point2D) -> bool {
    p.x >= seg.start.x.min(seg.end.x)
        && p.x <= seg.start.x.max(seg.end.x)
        && p.y >= seg.start.y.min(seg.end.y)
        && p.y <= seg.start.y.max(seg.end.y)
}
