//! Single drivable trajectory segment.

use std::fmt;

use crate::core::Point2D;

/// Number of waypoints sampled along every segment.
pub const WAYPOINT_COUNT: usize = 100;

/// One segment of a path: a cubic Bézier from `start` to `goal`.
///
/// Waypoints are sampled once at construction, uniformly over the curve
/// parameter with both endpoints included. Progress along the segment is
/// tracked as a consumed waypoint index that only moves forward.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStep {
    start: Point2D,
    control_1: Point2D,
    control_2: Point2D,
    goal: Point2D,
    width: f32,
    waypoints: Vec<Point2D>,
    consumed: usize,
}

impl PathStep {
    /// Build a segment. Missing control points make it a straight line.
    pub fn build(
        start: Point2D,
        goal: Point2D,
        control_1: Option<Point2D>,
        control_2: Option<Point2D>,
        width: f32,
    ) -> Self {
        let control_1 = control_1.unwrap_or_else(|| start.lerp(&goal, 1.0 / 3.0));
        let control_2 = control_2.unwrap_or_else(|| start.lerp(&goal, 2.0 / 3.0));
        let waypoints = sample_bezier(start, control_1, control_2, goal, WAYPOINT_COUNT);

        Self {
            start,
            control_1,
            control_2,
            goal,
            width,
            waypoints,
            consumed: 0,
        }
    }

    /// Straight segment.
    pub fn straight(start: Point2D, goal: Point2D, width: f32) -> Self {
        Self::build(start, goal, None, None, width)
    }

    /// Curved segment with explicit control points.
    pub fn curved(
        start: Point2D,
        control_1: Point2D,
        control_2: Point2D,
        goal: Point2D,
        width: f32,
    ) -> Self {
        Self::build(start, goal, Some(control_1), Some(control_2), width)
    }

    #[inline]
    pub fn start(&self) -> Point2D {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point2D {
        self.goal
    }

    /// Bézier control points.
    #[inline]
    pub fn controls(&self) -> (Point2D, Point2D) {
        (self.control_1, self.control_2)
    }

    /// Robot width this segment was planned for.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Every sampled waypoint, consumed or not.
    #[inline]
    pub fn waypoints(&self) -> &[Point2D] {
        &self.waypoints
    }

    /// Waypoints from the consumed index onward.
    #[inline]
    pub fn remaining(&self) -> &[Point2D] {
        &self.waypoints[self.consumed..]
    }

    /// Index of the first waypoint not yet driven past.
    #[inline]
    pub fn consumed_index(&self) -> usize {
        self.consumed
    }

    /// Move progress to the waypoint nearest `pose`.
    ///
    /// Only waypoints at or after the current consumed index are
    /// considered, so progress never moves backwards. Ties resolve to the
    /// earlier waypoint.
    pub fn advance(&mut self, pose: Point2D) -> usize {
        let mut best = self.consumed;
        let mut best_dist = f32::INFINITY;
        for (offset, waypoint) in self.remaining().iter().enumerate() {
            let dist = waypoint.distance_squared(&pose);
            if dist < best_dist {
                best_dist = dist;
                best = self.consumed + offset;
            }
        }
        self.consumed = best;
        self.consumed
    }

    /// Total polyline length of the sampled curve.
    pub fn length(&self) -> f32 {
        polyline_length(&self.waypoints)
    }

    /// Polyline length from the consumed waypoint to the goal.
    pub fn remaining_length(&self) -> f32 {
        polyline_length(self.remaining())
    }

    /// True once less than `threshold` of the segment is left.
    pub fn is_complete(&self, threshold: f32) -> bool {
        self.remaining_length() < threshold
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.goal)
    }
}

/// Sum of distances between consecutive points.
pub fn polyline_length(points: &[Point2D]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Cubic Bézier point at parameter `t`.
fn bezier_point(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D, t: f32) -> Point2D {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point2D::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

fn sample_bezier(
    p0: Point2D,
    p1: Point2D,
    p2: Point2D,
    p3: Point2D,
    count: usize,
) -> Vec<Point2D> {
    let last = count.saturating_sub(1).max(1) as f32;
    let mut points: Vec<Point2D> = (0..count)
        .map(|i| bezier_point(p0, p1, p2, p3, i as f32 / last))
        .collect();
    // Pin the endpoints exactly so consecutive segments chain without gaps
    if let Some(first) = points.first_mut() {
        *first = p0;
    }
    if let Some(end) = points.last_mut() {
        *end = p3;
    }
    points
}
