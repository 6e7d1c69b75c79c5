//! Obstacle and robot footprint model.
//!
//! An [`Obstacle`] carries two polygons:
//!
//! - **footprint**: the physical outline, tested by the collision checker
//! - **avoidance**: a larger regular polygon around the footprint whose
//!   corners seed the visibility graph
//!
//! The avoidance polygon is sized by its apothem rather than its
//! circumradius: every avoidance edge stays at least the robot half-width
//! (plus a small slack) away from the footprint, so a robot driving from
//! one avoidance corner to the next never grazes the obstacle.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::core::{Point2D, Polygon};

/// Default number of sides for synthesized obstacle polygons.
pub const DEFAULT_POLYGON_SIDES: usize = 8;

/// Relative slack added to the avoidance apothem.
const AVOIDANCE_SLACK: f32 = 0.02;

/// Robot footprint used to buffer trajectories.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Robot width, same unit as positions.
    pub width: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self { width: 0.30 }
    }
}

impl Hitbox {
    /// Create a hitbox of the given width.
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    /// Half the robot width: the buffer applied around obstacles.
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}

/// Obstacle as seen by the planner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Obstacle {
    footprint: Polygon,
    avoidance: Polygon,
}

impl Obstacle {
    /// Obstacle from explicit footprint and avoidance polygons.
    ///
    /// Either polygon may be empty: an empty avoidance polygon contributes
    /// no graph vertices, an empty footprint never collides.
    pub fn from_polygons(footprint: Polygon, avoidance: Polygon) -> Self {
        Self {
            footprint,
            avoidance,
        }
    }

    /// Obstacle from an arbitrary outline, centered on the vertex centroid.
    pub fn from_outline(outline: &[Point2D], robot_half_width: f32) -> Self {
        let footprint = Polygon::new(outline.to_vec());
        match footprint.centroid() {
            Some(center) => {
                let reach = footprint.circumradius_about(center);
                let avoidance = avoidance_polygon(center, reach, robot_half_width, DEFAULT_POLYGON_SIDES);
                Self::from_polygons(footprint, avoidance)
            }
            None => Self::default(),
        }
    }

    /// Physical outline.
    #[inline]
    pub fn footprint(&self) -> &Polygon {
        &self.footprint
    }

    /// Inflated outline whose corners become graph vertices.
    #[inline]
    pub fn avoidance(&self) -> &Polygon {
        &self.avoidance
    }

    /// True if the obstacle can neither block nor seed anything.
    pub fn is_degenerate(&self) -> bool {
        self.footprint.is_empty() && self.avoidance.is_empty()
    }
}

/// Build an obstacle around `center`.
///
/// The footprint is `outline` when supplied, otherwise a regular octagon
/// of `radius`. The avoidance polygon is a regular octagon enclosing the
/// footprint buffered by `robot_half_width`.
pub fn make_obstacle(
    center: Point2D,
    radius: f32,
    robot_half_width: f32,
    outline: Option<&[Point2D]>,
) -> Obstacle {
    make_obstacle_with_sides(center, radius, robot_half_width, outline, DEFAULT_POLYGON_SIDES)
}

/// [`make_obstacle`] with a custom side count (clamped to at least 3).
pub fn make_obstacle_with_sides(
    center: Point2D,
    radius: f32,
    robot_half_width: f32,
    outline: Option<&[Point2D]>,
    sides: usize,
) -> Obstacle {
    let sides = sides.max(3);
    let radius = radius.max(0.0);

    let footprint = match outline {
        Some(points) if !points.is_empty() => Polygon::new(points.to_vec()),
        _ => Polygon::regular(center, radius, sides),
    };

    let reach = footprint.circumradius_about(center).max(radius);
    let avoidance = avoidance_polygon(center, reach, robot_half_width, sides);

    Obstacle::from_polygons(footprint, avoidance)
}

/// Regular polygon whose edges keep `half_width` clear of a disc of `reach`.
fn avoidance_polygon(center: Point2D, reach: f32, half_width: f32, sides: usize) -> Polygon {
    let apothem = (reach + half_width.max(0.0)) * (1.0 + AVOIDANCE_SLACK);
    let circumradius = apothem / (PI / sides as f32).cos();
    Polygon::regular(center, circumradius, sides)
}
