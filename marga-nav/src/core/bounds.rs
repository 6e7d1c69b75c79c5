//! Axis-aligned bounding box used for quick rejection tests.

use super::point::Point2D;
use super::segment::Segment2D;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum corner
    pub min: Point2D,
    /// Maximum corner
    pub max: Point2D,
}

impl Bounds {
    /// Create from min and max corners.
    #[inline]
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Empty bounds (min > max) that expands to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point2D::new(f32::INFINITY, f32::INFINITY),
            max: Point2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing all points.
    pub fn from_points(points: &[Point2D]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(*p);
        }
        bounds
    }

    /// Box spanning a segment.
    pub fn from_segment(segment: &Segment2D) -> Self {
        Self::from_points(&[segment.start, segment.end])
    }

    /// True if no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Grow to include `point`.
    #[inline]
    pub fn expand_to_include(&mut self, point: Point2D) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Copy grown by `margin` on every side.
    #[inline]
    pub fn inflated(&self, margin: f32) -> Self {
        Self::new(
            Point2D::new(self.min.x - margin, self.min.y - margin),
            Point2D::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// True if the boxes overlap (touching counts).
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// True if `point` lies inside or on the border.
    #[inline]
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_never_intersects() {
        let empty = Bounds::empty();
        let unit = Bounds::new(Point2D::zero(), Point2D::new(1.0, 1.0));
        assert!(empty.is_empty());
        assert!(!empty.intersects(&unit));
        assert!(!unit.intersects(&empty));
    }

    #[test]
    fn test_inflated_intersects() {
        let a = Bounds::new(Point2D::zero(), Point2D::new(1.0, 1.0));
        let b = Bounds::new(Point2D::new(1.5, 0.0), Point2D::new(2.0, 1.0));
        assert!(!a.intersects(&b));
        assert!(a.inflated(0.5).intersects(&b));
    }

    #[test]
    fn test_from_points() {
        let b = Bounds::from_points(&[Point2D::new(1.0, -2.0), Point2D::new(-3.0, 4.0)]);
        assert_eq!(b.min, Point2D::new(-3.0, -2.0));
        assert_eq!(b.max, Point2D::new(1.0, 4.0));
        assert!(b.contains(Point2D::zero()));
    }
}
