//! Closed polygon with cached bounds.

use std::f32::consts::TAU;

use super::bounds::Bounds;
use super::point::Point2D;
use super::segment::Segment2D;

/// Closed polygon; the last vertex connects back to the first.
///
/// Fewer than three vertices is allowed: a single vertex behaves like a
/// point and two vertices like a segment. An empty polygon has no extent
/// and never collides with anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    bounds: Bounds,
}

impl Polygon {
    /// Create from an ordered vertex ring.
    pub fn new(vertices: Vec<Point2D>) -> Self {
        let bounds = Bounds::from_points(&vertices);
        Self { vertices, bounds }
    }

    /// Regular polygon around `center`.
    ///
    /// Vertex `i` sits at angle `(i + 0.5) * 2π / sides`, so an octagon has
    /// flat edges facing the axes.
    pub fn regular(center: Point2D, circumradius: f32, sides: usize) -> Self {
        let vertices = (0..sides)
            .map(|i| {
                let angle = (i as f32 + 0.5) * TAU / sides as f32;
                center + Point2D::from_polar(circumradius, angle)
            })
            .collect();
        Self::new(vertices)
    }

    /// Vertex ring.
    #[inline]
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Cached axis-aligned bounds.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Boundary edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment2D> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment2D::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Option<Point2D> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Point2D::zero(), |acc, p| acc + *p);
        Some(sum * (1.0 / self.vertices.len() as f32))
    }

    /// Largest distance from `center` to any vertex.
    pub fn circumradius_about(&self, center: Point2D) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.distance(&center))
            .fold(0.0, f32::max)
    }

    /// Even-odd point-in-polygon test. Always false below three vertices.
    pub fn contains(&self, point: Point2D) -> bool {
        if self.vertices.len() < 3 || !self.bounds.contains(point) {
            return false;
        }

        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = vj.x + (point.y - vj.y) * (vi.x - vj.x) / (vi.y - vj.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Distance between `segment` and the polygon region.
    ///
    /// Zero when the segment crosses the boundary or lies inside.
    /// Infinite for an empty polygon.
    pub fn distance_to_segment(&self, segment: &Segment2D) -> f32 {
        match self.vertices.len() {
            0 => f32::INFINITY,
            1 => segment.distance_to_point(self.vertices[0]),
            _ => {
                if self.contains(segment.start) {
                    return 0.0;
                }
                self.edges()
                    .map(|edge| edge.distance_to_segment(segment))
                    .fold(f32::INFINITY, f32::min)
            }
        }
    }

    /// True if `segment` comes closer than `clearance` to the polygon.
    ///
    /// With zero clearance this is a plain intersection test.
    pub fn is_within(&self, segment: &Segment2D, clearance: f32) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        if !self
            .bounds
            .inflated(clearance.max(0.0))
            .intersects(&Bounds::from_segment(segment))
        {
            return false;
        }

        let distance = self.distance_to_segment(segment);
        if clearance > 0.0 {
            distance < clearance
        } else {
            distance <= 0.0
        }
    }
}
